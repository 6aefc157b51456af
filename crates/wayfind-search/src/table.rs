//! Bookkeeping views shared by the searches.

use std::collections::BTreeMap;

use wayfind_graph::{Graph, NodeId};

use crate::trace::TableRow;

/// One row per graph node, ascending by id: current best distance
/// (`None` while still infinite), parent pointer, and adjacency.
/// Dijkstra records this full view on every step.
pub(crate) fn distance_rows(
    graph: &Graph,
    dist: &BTreeMap<NodeId, f64>,
    prev: &BTreeMap<NodeId, NodeId>,
) -> Vec<TableRow> {
    graph
        .node_ids()
        .map(|node| TableRow {
            node,
            distance: dist.get(&node).copied().filter(|d| d.is_finite()),
            parent: prev.get(&node).copied(),
            neighbors: graph.neighbor_ids(node),
        })
        .collect()
}

/// One row per visited node, in visitation order. BFS and A* record
/// this view; they track parents but neither distances nor adjacency.
pub(crate) fn visited_rows(order: &[NodeId], parent: &BTreeMap<NodeId, NodeId>) -> Vec<TableRow> {
    order
        .iter()
        .map(|&node| TableRow {
            node,
            distance: None,
            parent: parent.get(&node).copied(),
            neighbors: Vec::new(),
        })
        .collect()
}

/// Weight sum along `path`, counting 1 for any hop the adjacency does
/// not list. The searches only reconstruct hops they traversed, so the
/// fallback is never reached for their own paths.
pub(crate) fn path_cost(graph: &Graph, path: &[NodeId]) -> f64 {
    path.windows(2)
        .map(|hop| graph.weight(hop[0], hop[1]).unwrap_or(1.0))
        .sum()
}
