use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::frontier::Frontier;
use super::options::{NavigateOptions, RevisitPolicy};
use crate::storage::{Graph, Link, SharedGraph};
use crate::types::{GraphError, NodeId, Result};

/// Cost of traversing one link.
///
/// Any `FnMut(from, to) -> f64` closure is an edge cost. Costs must be
/// non-negative; `f64::INFINITY` marks a link that is never worth taking.
pub trait EdgeCost {
    /// Cost of moving along `link`.
    fn edge_cost(&mut self, link: &Link) -> f64;
}

impl<F> EdgeCost for F
where
    F: FnMut(NodeId, NodeId) -> f64,
{
    fn edge_cost(&mut self, link: &Link) -> f64 {
        self(link.from, link.to)
    }
}

/// Edge cost read from each link's stored weight.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkWeight;

impl EdgeCost for LinkWeight {
    fn edge_cost(&mut self, link: &Link) -> f64 {
        link.weight
    }
}

/// Estimated remaining cost from a node to the goal.
///
/// Any `FnMut(node, goal) -> f64` closure is a heuristic.
pub trait Heuristic {
    /// Estimate from `node` to `goal`.
    fn estimate(&mut self, node: NodeId, goal: NodeId) -> f64;
}

impl<F> Heuristic for F
where
    F: FnMut(NodeId, NodeId) -> f64,
{
    fn estimate(&mut self, node: NodeId, goal: NodeId) -> f64 {
        self(node, goal)
    }
}

/// Heuristic that always answers zero, turning the search into Dijkstra.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&mut self, _node: NodeId, _goal: NodeId) -> f64 {
        0.0
    }
}

/// Path found by [`Navigator::navigate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Ids from source to goal, both inclusive.
    pub path: Vec<NodeId>,
    /// Sum of the edge costs along `path`.
    pub cost: f64,
    /// Frontier pops performed, including the goal's.
    pub expansions: usize,
}

impl Route {
    fn trivial(node: NodeId) -> Self {
        Self {
            path: vec![node],
            cost: 0.0,
            expansions: 0,
        }
    }
}

/// Per-node bookkeeping for one search.
#[derive(Clone, Debug)]
struct Record {
    id: NodeId,
    g: f64,
    h: f64,
    /// Cost of the link from `prev`, recorded when `prev` was set.
    step: f64,
    prev: Option<usize>,
    open: bool,
    closed: bool,
}

/// Records for every registered id plus the id-to-record index.
struct Arena {
    records: Vec<Record>,
    index: FxHashMap<NodeId, usize>,
}

impl Arena {
    fn build<H: Heuristic>(graph: &Graph, goal: NodeId, heuristic: &mut H) -> Result<Self> {
        let population = graph.node_count();
        let mut records = Vec::with_capacity(population);
        let mut index = FxHashMap::with_capacity_and_hasher(population, Default::default());
        for id in graph.node_ids() {
            let h = heuristic.estimate(id, goal);
            if h.is_nan() {
                return Err(GraphError::InvalidHeuristic {
                    node: id,
                    estimate: h,
                });
            }
            index.insert(id, records.len());
            records.push(Record {
                id,
                g: f64::INFINITY,
                h,
                step: 0.0,
                prev: None,
                open: false,
                closed: false,
            });
        }
        Ok(Self { records, index })
    }

    fn slot(&self, id: NodeId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Follows back-pointers from `goal` and returns the source-first path
    /// with its summed cost.
    fn trace_back(&self, goal: usize) -> Result<(Vec<NodeId>, f64)> {
        let mut path = Vec::new();
        let mut cost = 0.0;
        let mut cur = Some(goal);
        while let Some(idx) = cur {
            if path.len() > self.records.len() {
                return Err(GraphError::Corruption("search back-pointers form a cycle"));
            }
            let record = &self.records[idx];
            path.push(record.id);
            if record.prev.is_some() {
                cost += record.step;
            }
            cur = record.prev;
        }
        path.reverse();
        Ok((path, cost))
    }
}

/// A* search parameterized by an edge cost and a heuristic.
///
/// The navigator holds no state between calls; every search rebuilds its
/// arena from the graph as it is at that moment.
#[derive(Clone, Debug)]
pub struct Navigator<E, H> {
    edge_cost: E,
    heuristic: H,
    options: NavigateOptions,
}

impl<E, H> Navigator<E, H>
where
    E: FnMut(NodeId, NodeId) -> f64,
    H: FnMut(NodeId, NodeId) -> f64,
{
    /// Navigator over two caller-supplied functions.
    pub fn new(edge_cost: E, heuristic: H) -> Self {
        Self::with_parts(edge_cost, heuristic)
    }
}

impl<H> Navigator<LinkWeight, H>
where
    H: FnMut(NodeId, NodeId) -> f64,
{
    /// Navigator that uses stored link weights as edge costs.
    pub fn by_link_weight(heuristic: H) -> Self {
        Self::with_parts(LinkWeight, heuristic)
    }
}

impl<E: EdgeCost, H: Heuristic> Navigator<E, H> {
    /// Navigator over any [`EdgeCost`] / [`Heuristic`] pair.
    pub fn with_parts(edge_cost: E, heuristic: H) -> Self {
        Self {
            edge_cost,
            heuristic,
            options: NavigateOptions::default(),
        }
    }

    /// Replaces the search options.
    pub fn with_options(mut self, options: NavigateOptions) -> Self {
        self.options = options;
        self
    }

    /// Current search options.
    pub fn options(&self) -> &NavigateOptions {
        &self.options
    }

    /// Searches for the cheapest path from `from` to `to`.
    ///
    /// Returns `Ok(Some(route))` when the goal is reached and `Ok(None)` when
    /// the frontier empties first. Unregistered endpoints, invalid costs,
    /// an exhausted budget, and cancellation are errors.
    pub fn navigate(&mut self, graph: &Graph, from: NodeId, to: NodeId) -> Result<Option<Route>> {
        for endpoint in [from, to] {
            if !graph.contains(endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }
        if from == to {
            graph.metrics().search_finished(0, true);
            return Ok(Some(Route::trivial(from)));
        }

        let mut arena = Arena::build(graph, to, &mut self.heuristic)?;
        let source = arena.slot(from)?;
        let goal = arena.slot(to)?;
        arena.records[source].g = 0.0;
        arena.records[source].open = true;
        let mut frontier = Frontier::new();
        frontier.push(source, arena.records[source].h);

        let mut expansions = 0usize;
        let reached = loop {
            if frontier.is_empty() {
                break false;
            }
            if let Some(limit) = self.options.max_expansions {
                if expansions >= limit {
                    debug!(from = %from, to = %to, expansions, "navigate.budget_exhausted");
                    return Err(GraphError::BudgetExhausted { expansions });
                }
            }
            if let Some(token) = &self.options.cancel {
                if token.is_cancelled() {
                    debug!(from = %from, to = %to, expansions, "navigate.cancelled");
                    return Err(GraphError::Cancelled);
                }
            }
            let Some(current) = frontier.pop() else {
                break false;
            };
            expansions += 1;
            {
                let record = &mut arena.records[current];
                record.open = false;
                record.closed = true;
                trace!(node = %record.id, g = record.g, f = record.g + record.h, "navigate.expand");
            }
            if current == goal {
                break true;
            }
            self.relax(graph, &mut arena, &mut frontier, current)?;
        };

        graph.metrics().search_finished(expansions, reached);
        debug!(
            from = %from,
            to = %to,
            expansions,
            frontier_high_water = frontier.high_water(),
            found = reached,
            "navigate.finish"
        );
        if !reached {
            return Ok(None);
        }
        let (path, cost) = arena.trace_back(goal)?;
        Ok(Some(Route {
            path,
            cost,
            expansions,
        }))
    }

    fn relax(
        &mut self,
        graph: &Graph,
        arena: &mut Arena,
        frontier: &mut Frontier,
        current: usize,
    ) -> Result<()> {
        let current_id = arena.records[current].id;
        let current_g = arena.records[current].g;
        for link in graph.outgoing_links(current_id) {
            let Some(&next) = arena.index.get(&link.to) else {
                continue;
            };
            let skip = match self.options.revisit {
                RevisitPolicy::PredecessorOnly => arena.records[next].prev == Some(current),
                RevisitPolicy::ClosedSet => arena.records[next].closed,
            };
            if skip {
                continue;
            }
            let step = self.edge_cost.edge_cost(link);
            if step.is_nan() || step < 0.0 {
                return Err(GraphError::InvalidCost {
                    from: link.from,
                    to: link.to,
                    cost: step,
                });
            }
            let g = current_g + step;
            let record = &mut arena.records[next];
            if g >= record.g {
                continue;
            }
            record.g = g;
            record.step = step;
            record.prev = Some(current);
            let f = g + record.h;
            if record.open {
                frontier.remove(next);
            }
            record.open = true;
            frontier.push(next, f);
        }
        Ok(())
    }
}

impl Graph {
    /// One-off search with the default options.
    pub fn navigate<E, H>(
        &self,
        from: NodeId,
        to: NodeId,
        edge_cost: E,
        heuristic: H,
    ) -> Result<Option<Route>>
    where
        E: FnMut(NodeId, NodeId) -> f64,
        H: FnMut(NodeId, NodeId) -> f64,
    {
        Navigator::new(edge_cost, heuristic).navigate(self, from, to)
    }
}

impl SharedGraph {
    /// Runs `navigator` while holding the graph lock.
    pub fn navigate<E: EdgeCost, H: Heuristic>(
        &self,
        navigator: &mut Navigator<E, H>,
        from: NodeId,
        to: NodeId,
    ) -> Result<Option<Route>> {
        self.read(|graph| navigator.navigate(graph, from, to))
    }
}
