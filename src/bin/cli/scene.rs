//! Demo scenes: a graph plus the coordinates the engine never sees.

use pathgraph::{Graph, GraphError, GraphOptions, NavigateOptions, Navigator, NodeId, Result, Route};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

const GRID_OVERFLOW: &str = "grid dimensions overflow the node id space";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

pub struct Scene {
    pub graph: Graph,
    points: FxHashMap<NodeId, Point>,
}

impl Scene {
    /// 4-connected grid with links in both directions. Cells are numbered
    /// row-major from 1; a blocked cell stays registered but unlinked.
    pub fn grid(
        opts: GraphOptions,
        width: u64,
        height: u64,
        blocked: f64,
        seed: u64,
        keep_open: &[NodeId],
    ) -> Result<Self> {
        let cells = width
            .checked_mul(height)
            .ok_or(GraphError::Invalid(GRID_OVERFLOW))?;
        let cells = fit_capacity(&opts, cells)?;
        let mut graph = Graph::new(opts)?;
        let mut points = FxHashMap::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut open = Vec::with_capacity(cells);
        for y in 0..height {
            for x in 0..width {
                let id = graph.allocate_id()?;
                points.insert(
                    id,
                    Point {
                        x: x as f64,
                        y: y as f64,
                    },
                );
                open.push(keep_open.contains(&id) || !rng.gen_bool(blocked));
            }
        }
        let cell = |x: u64, y: u64| NodeId(y * width + x + 1);
        for y in 0..height {
            for x in 0..width {
                let here = cell(x, y);
                if !open[(here.0 - 1) as usize] {
                    continue;
                }
                let right = (x + 1 < width).then(|| cell(x + 1, y));
                let down = (y + 1 < height).then(|| cell(x, y + 1));
                for there in [right, down].into_iter().flatten() {
                    if open[(there.0 - 1) as usize] {
                        graph.make_link(here, there)?;
                        graph.make_link(there, here)?;
                    }
                }
            }
        }
        let mut scene = Self { graph, points };
        scene.refresh_weights()?;
        Ok(scene)
    }

    /// Points scattered over the unit square with `links` random directed
    /// links between distinct nodes.
    pub fn random(opts: GraphOptions, nodes: u64, links: usize, seed: u64) -> Result<Self> {
        let count = fit_capacity(&opts, nodes)?;
        let links = links.min(count.saturating_mul(count.saturating_sub(1)));
        let mut graph = Graph::new(opts)?;
        let mut points = FxHashMap::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ids = Vec::with_capacity(count);
        for _ in 0..nodes {
            let id = graph.allocate_id()?;
            points.insert(
                id,
                Point {
                    x: rng.gen::<f64>(),
                    y: rng.gen::<f64>(),
                },
            );
            ids.push(id);
        }
        if ids.len() >= 2 {
            let mut attempts = links.saturating_mul(4);
            while graph.link_count() < links && attempts > 0 {
                attempts -= 1;
                let from = ids[rng.gen_range(0..ids.len())];
                let to = ids[rng.gen_range(0..ids.len())];
                if from != to && graph.find_link(from, to).is_none() {
                    graph.make_link(from, to)?;
                }
            }
        }
        let mut scene = Self { graph, points };
        scene.refresh_weights()?;
        Ok(scene)
    }

    /// Stores the Euclidean length on every link.
    fn refresh_weights(&mut self) -> Result<()> {
        let points = &self.points;
        self.graph
            .refresh_link_weights(|from, to| distance(points, from, to))
    }

    /// Searches with stored lengths as edge costs and straight-line distance
    /// as the heuristic.
    pub fn navigate(
        &self,
        from: NodeId,
        to: NodeId,
        opts: NavigateOptions,
    ) -> Result<Option<Route>> {
        let points = &self.points;
        Navigator::by_link_weight(|node, goal| distance(points, node, goal))
            .with_options(opts)
            .navigate(&self.graph, from, to)
    }
}

/// Rejects scenes that cannot fit the registry before anything is allocated.
fn fit_capacity(opts: &GraphOptions, nodes: u64) -> Result<usize> {
    match usize::try_from(nodes) {
        Ok(count) if count <= opts.capacity => Ok(count),
        _ => Err(GraphError::CapacityExhausted {
            capacity: opts.capacity,
        }),
    }
}

fn distance(points: &FxHashMap<NodeId, Point>, a: NodeId, b: NodeId) -> f64 {
    match (points.get(&a), points.get(&b)) {
        (Some(pa), Some(pb)) => pa.distance(*pb),
        _ => 0.0,
    }
}
