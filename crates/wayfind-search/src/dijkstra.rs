//! Dijkstra's algorithm with lazy heap deletion.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace};
use wayfind_graph::{Graph, NodeId};

use crate::heap::MinHeap;
use crate::table::distance_rows;
use crate::trace::{SearchResult, Step, TableRow};

/// Cheapest-weight path from `source` to `target`.
///
/// Classic relaxation over a min-heap. There is no decrease-key:
/// improving a node's distance inserts a fresh heap entry, and entries
/// for already-visited nodes are skipped right after extraction. The
/// run drains the whole heap rather than breaking at the target, so the
/// trace covers every reachable node. One step is recorded per
/// non-stale extraction, after that node's edges have been relaxed, so
/// the queue snapshot includes the entries the visit just pushed and
/// the table holds every graph node's current distance and parent.
pub fn shortest_path(graph: &Graph, source: NodeId, target: NodeId) -> SearchResult {
    let mut dist: BTreeMap<NodeId, f64> =
        graph.node_ids().map(|id| (id, f64::INFINITY)).collect();
    let mut prev: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut heap = MinHeap::new();
    let mut steps = Vec::new();

    dist.insert(source, 0.0);
    heap.insert(source, 0.0);

    while let Some(entry) = heap.extract_min() {
        // The visited check must come before the entry is used: extra
        // insertions for a node are legal and all but the first
        // extraction are stale.
        if !visited.insert(entry.node) {
            trace!(node = entry.node.0, "skipping stale heap entry");
            continue;
        }
        let current = entry.node;
        let current_dist = dist.get(&current).copied().unwrap_or(f64::INFINITY);
        let previous = prev.get(&current).copied();
        let neighbors = graph.neighbor_ids(current);

        for neighbor in graph.neighbors(current) {
            let candidate = current_dist + neighbor.weight;
            let best = dist.get(&neighbor.node).copied().unwrap_or(f64::INFINITY);
            if candidate < best {
                dist.insert(neighbor.node, candidate);
                prev.insert(neighbor.node, current);
                heap.insert(neighbor.node, candidate);
            }
        }

        steps.push(Step {
            queue: heap.snapshot(),
            table: distance_rows(graph, &dist, &prev),
            current,
            previous,
            neighbors,
            log: format!("Visiting {current}"),
        });
    }

    match reconstruct(&dist, &prev, source, target) {
        Some((path, distance)) => {
            debug!(steps = steps.len(), distance, "dijkstra finished");
            SearchResult::found(steps, path, distance)
        }
        None => {
            debug!(steps = steps.len(), "dijkstra found no path");
            SearchResult::not_found(steps)
        }
    }
}

/// Converged bookkeeping table for a single source, without recording
/// steps. Backs the standalone distance-table view.
pub fn distance_table(graph: &Graph, source: NodeId) -> Vec<TableRow> {
    let mut dist: BTreeMap<NodeId, f64> =
        graph.node_ids().map(|id| (id, f64::INFINITY)).collect();
    let mut prev: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut heap = MinHeap::new();

    dist.insert(source, 0.0);
    heap.insert(source, 0.0);

    while let Some(entry) = heap.extract_min() {
        if !visited.insert(entry.node) {
            continue;
        }
        let current_dist = dist.get(&entry.node).copied().unwrap_or(f64::INFINITY);
        for neighbor in graph.neighbors(entry.node) {
            let candidate = current_dist + neighbor.weight;
            let best = dist.get(&neighbor.node).copied().unwrap_or(f64::INFINITY);
            if candidate < best {
                dist.insert(neighbor.node, candidate);
                prev.insert(neighbor.node, entry.node);
                heap.insert(neighbor.node, candidate);
            }
        }
    }

    distance_rows(graph, &dist, &prev)
}

fn reconstruct(
    dist: &BTreeMap<NodeId, f64>,
    prev: &BTreeMap<NodeId, NodeId>,
    source: NodeId,
    target: NodeId,
) -> Option<(Vec<NodeId>, f64)> {
    let target_dist = dist.get(&target).copied().unwrap_or(f64::INFINITY);
    if !target_dist.is_finite() {
        return None;
    }
    if source == target {
        return Some((vec![source], 0.0));
    }
    prev.get(&target)?;

    let mut path = vec![target];
    let mut current = target;
    while let Some(&parent) = prev.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    if path.first() != Some(&source) {
        return None;
    }
    Some((path, target_dist))
}
