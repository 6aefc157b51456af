//! Breadth-first search over whole paths, minimizing hop count.

use std::collections::{BTreeMap, HashSet, VecDeque};

use tracing::debug;
use wayfind_graph::{Graph, NodeId};

use crate::table::{path_cost, visited_rows};
use crate::trace::{QueueEntry, SearchResult, Step};

/// Hop-minimal path from `source` to `target`.
///
/// The frontier holds whole paths rather than bare nodes, so the first
/// path dequeued at the target has the fewest edges of any route to it;
/// the search stops the instant that happens, not when the target is
/// merely discovered. One step is recorded per dequeue, with the
/// remaining frontier rendered as `"a→b→c"` path labels. `distance` is
/// the weight sum along the returned path, which for non-uniform
/// weights is not necessarily the cheapest-weight route: BFS optimizes
/// hop count.
pub fn shortest_path(graph: &Graph, source: NodeId, target: NodeId) -> SearchResult {
    let mut frontier: VecDeque<Vec<NodeId>> = VecDeque::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut visit_order: Vec<NodeId> = Vec::new();
    let mut parent: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut steps = Vec::new();
    let mut found: Option<Vec<NodeId>> = None;

    frontier.push_back(vec![source]);
    visited.insert(source);
    visit_order.push(source);

    while let Some(path) = frontier.pop_front() {
        let current = match path.last() {
            Some(&node) => node,
            None => continue,
        };
        let previous = if path.len() > 1 {
            Some(path[path.len() - 2])
        } else {
            None
        };
        let neighbors = graph.neighbor_ids(current);

        steps.push(Step {
            queue: frontier.iter().filter_map(|p| path_entry(p)).collect(),
            table: visited_rows(&visit_order, &parent),
            current,
            previous,
            neighbors,
            log: format!("Visiting {current}"),
        });

        if current == target {
            found = Some(path);
            break;
        }

        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor.node) {
                visit_order.push(neighbor.node);
                parent.insert(neighbor.node, current);
                let mut next = path.clone();
                next.push(neighbor.node);
                frontier.push_back(next);
            }
        }
    }

    match found {
        Some(path) => {
            let distance = path_cost(graph, &path);
            debug!(steps = steps.len(), distance, "bfs reached target");
            SearchResult::found(steps, path, distance)
        }
        None => {
            debug!(steps = steps.len(), "bfs exhausted frontier");
            SearchResult::not_found(steps)
        }
    }
}

fn path_entry(path: &[NodeId]) -> Option<QueueEntry> {
    path.last().map(|&tip| QueueEntry {
        node: tip,
        label: path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("→"),
    })
}
