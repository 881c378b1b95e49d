#![cfg(test)]

use super::*;
use crate::storage::{CounterMetrics, GraphOptions};
use crate::types::GraphError;
use std::sync::atomic::Ordering;

fn small_graph(capacity: usize) -> Graph {
    Graph::new(GraphOptions::new().capacity(capacity).buckets(7)).expect("graph")
}

#[test]
fn allocate_counts_up_from_latest() -> Result<()> {
    let mut graph = small_graph(8);
    assert_eq!(graph.allocate_id()?, NodeId(1));
    assert_eq!(graph.allocate_id()?, NodeId(2));
    graph.register_id(NodeId(10))?;
    assert_eq!(graph.latest_id(), NodeId(10));
    assert_eq!(graph.allocate_id()?, NodeId(11));
    graph.register_id(NodeId(4))?;
    assert_eq!(graph.latest_id(), NodeId(11));
    Ok(())
}

#[test]
fn register_rejects_duplicates() -> Result<()> {
    let mut graph = small_graph(8);
    let id = graph.allocate_id()?;
    assert_eq!(graph.register_id(id), Err(GraphError::DuplicateId(id)));
    assert_eq!(graph.node_count(), 1);
    Ok(())
}

#[test]
fn allocation_surfaces_capacity_exhaustion() -> Result<()> {
    let mut graph = small_graph(2);
    graph.allocate_id()?;
    graph.allocate_id()?;
    assert_eq!(
        graph.allocate_id(),
        Err(GraphError::CapacityExhausted { capacity: 2 })
    );
    assert_eq!(graph.latest_id(), NodeId(2));
    assert_eq!(
        graph.register_id(NodeId(50)),
        Err(GraphError::CapacityExhausted { capacity: 2 })
    );
    assert_eq!(graph.latest_id(), NodeId(2));
    Ok(())
}

#[test]
fn links_are_directed_and_unique() -> Result<()> {
    let mut graph = small_graph(8);
    let a = graph.allocate_id()?;
    let b = graph.allocate_id()?;
    graph.make_link(a, b)?;
    assert_eq!(
        graph.make_link(a, b),
        Err(GraphError::DuplicateLink { from: a, to: b })
    );
    assert!(graph.find_link(b, a).is_none());
    graph.make_link(b, a)?;
    assert_eq!(graph.link_count(), 2);
    assert_eq!(graph.neighbors(a).collect::<Vec<_>>(), vec![b]);
    assert_eq!(graph.neighbors(b).collect::<Vec<_>>(), vec![a]);
    Ok(())
}

#[test]
fn links_require_registered_endpoints() -> Result<()> {
    let mut graph = small_graph(8);
    let a = graph.allocate_id()?;
    assert_eq!(
        graph.make_link(a, NodeId(99)),
        Err(GraphError::UnknownNode(NodeId(99)))
    );
    assert_eq!(
        graph.make_link(NodeId(98), a),
        Err(GraphError::UnknownNode(NodeId(98)))
    );
    assert_eq!(graph.link_count(), 0);
    Ok(())
}

#[test]
fn remove_link_is_idempotent() -> Result<()> {
    let mut graph = small_graph(8);
    let a = graph.allocate_id()?;
    let b = graph.allocate_id()?;
    let link = graph.make_link(a, b)?;
    let removed = graph.remove_link(link).expect("live link");
    assert_eq!((removed.from, removed.to), (a, b));
    assert!(graph.remove_link(link).is_none());
    assert_eq!(graph.out_degree(a), 0);
    assert_eq!(graph.in_degree(b), 0);

    // The recycled slot must not resurrect the old handle.
    let again = graph.make_link(a, b)?;
    assert_eq!(again.slot(), link.slot());
    assert_ne!(again, link);
    assert!(graph.link(link).is_none());
    assert!(graph.link(again).is_some());
    Ok(())
}

#[test]
fn free_node_cascades() -> Result<()> {
    let mut graph = small_graph(8);
    let a = graph.allocate_id()?;
    let b = graph.allocate_id()?;
    let c = graph.allocate_id()?;
    graph.make_link(a, b)?;
    graph.make_link(b, c)?;
    graph.make_link(c, b)?;
    graph.make_link(b, b)?;
    graph.make_link(a, c)?;

    assert!(graph.free_node(b));
    assert!(!graph.contains(b));
    assert_eq!(graph.link_count(), 1);
    assert!(graph
        .links()
        .all(|(_, link)| link.from != b && link.to != b));
    assert_eq!(graph.neighbors(a).collect::<Vec<_>>(), vec![c]);
    assert!(graph.neighbors_dir(c, Dir::Both).contains(&a));
    assert!(!graph.free_node(b));
    graph.registry().verify()
}

#[test]
fn neighbor_directions() -> Result<()> {
    let mut graph = small_graph(8);
    let a = graph.allocate_id()?;
    let b = graph.allocate_id()?;
    let c = graph.allocate_id()?;
    graph.make_link(a, b)?;
    graph.make_link(c, a)?;
    assert_eq!(graph.neighbors_dir(a, Dir::Out), vec![b]);
    assert_eq!(graph.neighbors_dir(a, Dir::In), vec![c]);
    assert_eq!(graph.neighbors_dir(a, Dir::Both), vec![b, c]);
    Ok(())
}

#[test]
fn weights_are_validated_and_refreshed() -> Result<()> {
    let mut graph = small_graph(8);
    let a = graph.allocate_id()?;
    let b = graph.allocate_id()?;
    let link = graph.make_weighted_link(a, b, 2.5)?;
    assert_eq!(graph.link_weight(a, b), Some(2.5));
    assert_eq!(
        graph.make_weighted_link(b, a, -1.0),
        Err(GraphError::InvalidWeight(-1.0))
    );
    graph.set_link_weight(link, 4.0)?;
    assert_eq!(graph.link_weight(a, b), Some(4.0));

    graph.refresh_link_weights(|from, to| (to.0 - from.0) as f64 * 10.0)?;
    assert_eq!(graph.link_weight(a, b), Some(10.0));
    assert!(graph.refresh_link_weights(|_, _| f64::NAN).is_err());
    assert_eq!(graph.link_weight(a, b), Some(10.0));

    graph.remove_link(link);
    assert_eq!(graph.set_link_weight(link, 1.0), Err(GraphError::UnknownLink(link)));
    Ok(())
}

#[test]
fn metrics_track_mutations() -> Result<()> {
    let metrics = std::sync::Arc::new(CounterMetrics::default());
    let mut graph = Graph::new(GraphOptions::new().metrics(metrics.clone()))?;
    let a = graph.allocate_id()?;
    let b = graph.allocate_id()?;
    graph.make_link(a, b)?;
    graph.make_link(b, a)?;
    graph.free_node(a);
    assert_eq!(metrics.nodes_registered.load(Ordering::Relaxed), 2);
    assert_eq!(metrics.nodes_freed.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.links_created.load(Ordering::Relaxed), 2);
    assert_eq!(metrics.links_removed.load(Ordering::Relaxed), 2);
    Ok(())
}
