use pathgraph::query::ZeroHeuristic;
use pathgraph::{Graph, GraphError, GraphOptions, Navigator, NodeId, Result};

fn zero(_: NodeId, _: NodeId) -> f64 {
    0.0
}

fn weighted_graph(nodes: u64, links: &[(u64, u64, f64)]) -> Result<Graph> {
    let mut graph = Graph::new(GraphOptions::new().capacity(64))?;
    for _ in 0..nodes {
        graph.allocate_id()?;
    }
    for &(from, to, weight) in links {
        graph.make_weighted_link(NodeId(from), NodeId(to), weight)?;
    }
    Ok(graph)
}

fn ids(raw: &[u64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}

#[test]
fn chain_is_followed_link_by_link() -> Result<()> {
    let graph = weighted_graph(3, &[(1, 2, 1.0), (2, 3, 1.0)])?;
    let route = Navigator::by_link_weight(zero)
        .navigate(&graph, NodeId(1), NodeId(3))?
        .expect("chain is connected");
    assert_eq!(route.path, ids(&[1, 2, 3]));
    assert_eq!(route.cost, 2.0);
    Ok(())
}

#[test]
fn unlinked_nodes_are_unreachable() -> Result<()> {
    let graph = weighted_graph(2, &[])?;
    let route = Navigator::by_link_weight(zero).navigate(&graph, NodeId(1), NodeId(2))?;
    assert!(route.is_none());
    Ok(())
}

#[test]
fn diamond_prefers_cheaper_detour() -> Result<()> {
    let graph = weighted_graph(3, &[(1, 2, 5.0), (1, 3, 1.0), (3, 2, 1.0)])?;
    let route = Navigator::with_parts(pathgraph::query::LinkWeight, ZeroHeuristic)
        .navigate(&graph, NodeId(1), NodeId(2))?
        .expect("diamond is connected");
    assert_eq!(route.path, ids(&[1, 3, 2]));
    assert_eq!(route.cost, 2.0);
    Ok(())
}

#[test]
fn trivial_route_for_every_registered_node() -> Result<()> {
    let mut graph = weighted_graph(4, &[(1, 2, 1.0)])?;
    graph.register_id(NodeId(500))?;
    let mut navigator = Navigator::by_link_weight(zero);
    for id in graph.node_ids().collect::<Vec<_>>() {
        let route = navigator.navigate(&graph, id, id)?.expect("trivial route");
        assert_eq!(route.path, vec![id]);
        assert_eq!(route.cost, 0.0);
    }
    Ok(())
}

#[test]
fn unknown_endpoints_fail_instead_of_searching() -> Result<()> {
    let graph = weighted_graph(2, &[(1, 2, 1.0)])?;
    let mut navigator = Navigator::by_link_weight(zero);
    assert_eq!(
        navigator.navigate(&graph, NodeId(1), NodeId(9)),
        Err(GraphError::UnknownNode(NodeId(9)))
    );
    assert_eq!(
        navigator.navigate(&graph, NodeId(9), NodeId(9)),
        Err(GraphError::UnknownNode(NodeId(9)))
    );
    Ok(())
}

#[test]
fn links_are_directed() -> Result<()> {
    let mut graph = weighted_graph(2, &[(1, 2, 1.0)])?;
    let mut navigator = Navigator::by_link_weight(zero);
    assert!(navigator.navigate(&graph, NodeId(2), NodeId(1))?.is_none());
    assert_eq!(
        graph.make_link(NodeId(1), NodeId(2)),
        Err(GraphError::DuplicateLink {
            from: NodeId(1),
            to: NodeId(2)
        })
    );
    graph.make_link(NodeId(2), NodeId(1))?;
    let back = navigator
        .navigate(&graph, NodeId(2), NodeId(1))?
        .expect("reverse link added");
    assert_eq!(back.path, ids(&[2, 1]));
    Ok(())
}

#[test]
fn rerun_sees_new_cheaper_link() -> Result<()> {
    let mut graph = weighted_graph(4, &[(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)])?;
    let mut navigator = Navigator::by_link_weight(zero);
    let before = navigator
        .navigate(&graph, NodeId(1), NodeId(4))?
        .expect("chain");
    assert_eq!(before.path, ids(&[1, 2, 3, 4]));
    assert_eq!(before.cost, 3.0);

    graph.make_weighted_link(NodeId(1), NodeId(4), 0.5)?;
    let after = navigator
        .navigate(&graph, NodeId(1), NodeId(4))?
        .expect("shortcut");
    assert_eq!(after.path, ids(&[1, 4]));
    assert_eq!(after.cost, 0.5);
    Ok(())
}

#[test]
fn freeing_a_waypoint_cuts_the_route() -> Result<()> {
    let mut graph = weighted_graph(3, &[(1, 2, 1.0), (2, 3, 1.0)])?;
    assert!(graph.free_node(NodeId(2)));
    assert_eq!(graph.link_count(), 0);
    let route = Navigator::by_link_weight(zero).navigate(&graph, NodeId(1), NodeId(3))?;
    assert!(route.is_none());
    Ok(())
}

#[test]
fn injected_costs_override_stored_weights() -> Result<()> {
    let graph = weighted_graph(3, &[(1, 2, 5.0), (1, 3, 1.0), (3, 2, 1.0)])?;
    // Only the direct link is cheap under this cost model.
    let route = graph
        .navigate(
            NodeId(1),
            NodeId(2),
            |from: NodeId, to: NodeId| {
                if (from, to) == (NodeId(1), NodeId(2)) {
                    0.5
                } else {
                    10.0
                }
            },
            zero,
        )?
        .expect("connected");
    assert_eq!(route.path, ids(&[1, 2]));
    assert_eq!(route.cost, 0.5);
    Ok(())
}

#[test]
fn admissible_heuristic_keeps_optimal_cost() -> Result<()> {
    // Nodes on a line at x = id; straight-line distance never overestimates.
    let graph = weighted_graph(
        5,
        &[(1, 2, 1.0), (2, 3, 1.0), (3, 5, 2.0), (1, 4, 3.0), (4, 5, 2.5)],
    )?;
    let route = Navigator::by_link_weight(|node: NodeId, goal: NodeId| {
        (goal.0 as f64 - node.0 as f64).abs()
    })
    .navigate(&graph, NodeId(1), NodeId(5))?
    .expect("connected");
    assert_eq!(route.path, ids(&[1, 2, 3, 5]));
    assert_eq!(route.cost, 4.0);
    Ok(())
}
