//! Adjacency construction and lookups.
//!
//! A graph is a mapping from node id to an ordered neighbor list, built
//! once from the editor's node and edge lists and immutable for the
//! lifetime of a search. Keys iterate in ascending id order so that
//! anything derived from a graph walk is reproducible.

use std::collections::BTreeMap;

use crate::node::{Edge, Node, NodeId};

/// One adjacency entry: a reachable node and the edge weight to it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: f64,
}

/// A display row of the adjacency view: one node and its neighbors
/// rendered as `"<to>(<weight>)"` labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyRow {
    pub node: NodeId,
    pub neighbors: Vec<String>,
}

/// Weighted adjacency mapping.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    adjacency: BTreeMap<NodeId, Vec<Neighbor>>,
    directed: bool,
}

impl Graph {
    /// Build the adjacency mapping from node and edge lists.
    ///
    /// Every node id gets a key, isolated nodes included. An edge
    /// direction is registered only when its origin id is a known node;
    /// an id never listed as a node gains no key, so downstream lookups
    /// against it see an empty neighbor list rather than an error. With
    /// `directed = false` each edge registers both ways, and a self-loop
    /// registers twice (a long-standing quirk the editor relies on).
    ///
    /// ```
    /// use wayfind_graph::{Edge, Graph, Node, NodeId};
    ///
    /// let nodes = [Node::new(NodeId(1), 0.0, 0.0), Node::new(NodeId(2), 1.0, 0.0)];
    /// let edges = [Edge::new(NodeId(1), NodeId(2), 4.0)];
    /// let graph = Graph::build(&nodes, &edges, false);
    ///
    /// assert_eq!(graph.weight(NodeId(1), NodeId(2)), Some(4.0));
    /// assert_eq!(graph.weight(NodeId(2), NodeId(1)), Some(4.0));
    /// ```
    pub fn build(nodes: &[Node], edges: &[Edge], directed: bool) -> Self {
        let mut adjacency: BTreeMap<NodeId, Vec<Neighbor>> = BTreeMap::new();
        for node in nodes {
            adjacency.entry(node.id).or_default();
        }
        for edge in edges {
            if let Some(list) = adjacency.get_mut(&edge.from) {
                list.push(Neighbor { node: edge.to, weight: edge.weight });
            }
            if !directed {
                if let Some(list) = adjacency.get_mut(&edge.to) {
                    list.push(Neighbor { node: edge.from, weight: edge.weight });
                }
            }
        }
        Self { adjacency, directed }
    }

    /// Whether the graph was built with directed edges.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// True when `id` was registered as a node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbor entries of `id`, in registration order; empty for ids the
    /// graph does not know.
    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids adjacent to `id`, in registration order.
    pub fn neighbor_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbors(id).iter().map(|n| n.node).collect()
    }

    /// Weight of the first registered `from → to` entry.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .find(|n| n.node == to)
            .map(|n| n.weight)
    }

    /// All node ids, ascending.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// The "Neighbors (weight)" view shown next to the canvas: one row
    /// per node, neighbors as `"<to>(<weight>)"`.
    pub fn adjacency_rows(&self) -> Vec<AdjacencyRow> {
        self.adjacency
            .iter()
            .map(|(node, neighbors)| AdjacencyRow {
                node: *node,
                neighbors: neighbors
                    .iter()
                    .map(|n| format!("{}({})", n.node, n.weight))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nodes(ids: &[u64]) -> Vec<Node> {
        ids.iter().map(|&i| Node::new(NodeId(i), 0.0, 0.0)).collect()
    }

    #[test]
    fn isolated_nodes_get_empty_lists() {
        let graph = Graph::build(&nodes(&[1, 2, 3]), &[], false);
        assert_eq!(graph.len(), 3);
        for id in [1, 2, 3] {
            assert!(graph.contains(NodeId(id)));
            assert!(graph.neighbors(NodeId(id)).is_empty());
        }
    }

    #[test]
    fn undirected_edges_register_both_ways() {
        let edges = [Edge::new(NodeId(1), NodeId(2), 4.0)];
        let graph = Graph::build(&nodes(&[1, 2]), &edges, false);
        assert_eq!(graph.neighbor_ids(NodeId(1)), vec![NodeId(2)]);
        assert_eq!(graph.neighbor_ids(NodeId(2)), vec![NodeId(1)]);
        assert_eq!(graph.weight(NodeId(2), NodeId(1)), Some(4.0));
    }

    #[test]
    fn directed_edges_register_one_way() {
        let edges = [Edge::new(NodeId(1), NodeId(2), 4.0)];
        let graph = Graph::build(&nodes(&[1, 2]), &edges, true);
        assert_eq!(graph.neighbor_ids(NodeId(1)), vec![NodeId(2)]);
        assert!(graph.neighbors(NodeId(2)).is_empty());
        assert_eq!(graph.weight(NodeId(2), NodeId(1)), None);
    }

    #[test]
    fn undirected_self_loop_registers_twice() {
        let edges = [Edge::new(NodeId(1), NodeId(1), 2.0)];
        let graph = Graph::build(&nodes(&[1]), &edges, false);
        assert_eq!(graph.neighbor_ids(NodeId(1)), vec![NodeId(1), NodeId(1)]);
    }

    #[test]
    fn edge_from_unknown_origin_is_dropped() {
        let edges = [Edge::new(NodeId(9), NodeId(1), 1.0)];
        let graph = Graph::build(&nodes(&[1]), &edges, true);
        assert!(!graph.contains(NodeId(9)));
        assert!(graph.neighbors(NodeId(1)).is_empty());
    }

    #[test]
    fn edge_to_unknown_id_keeps_the_known_side() {
        // The dangling neighbor stays in 1's list; lookups against 9 see
        // an empty list because 9 never became a key.
        let edges = [Edge::new(NodeId(1), NodeId(9), 1.0)];
        let graph = Graph::build(&nodes(&[1]), &edges, false);
        assert_eq!(graph.neighbor_ids(NodeId(1)), vec![NodeId(9)]);
        assert!(graph.neighbors(NodeId(9)).is_empty());
    }

    #[test]
    fn adjacency_rows_render_weight_labels() {
        let edges = [
            Edge::new(NodeId(1), NodeId(2), 4.0),
            Edge::new(NodeId(1), NodeId(3), 2.5),
        ];
        let graph = Graph::build(&nodes(&[1, 2, 3]), &edges, false);
        let rows = graph.adjacency_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].node, NodeId(1));
        assert_eq!(rows[0].neighbors, vec!["2(4)", "3(2.5)"]);
        assert_eq!(rows[1].neighbors, vec!["1(4)"]);
        assert_eq!(rows[2].neighbors, vec!["1(2.5)"]);
    }

    #[test]
    fn parallel_edges_keep_first_weight_for_lookup() {
        let edges = [
            Edge::new(NodeId(1), NodeId(2), 4.0),
            Edge::new(NodeId(1), NodeId(2), 9.0),
        ];
        let graph = Graph::build(&nodes(&[1, 2]), &edges, true);
        assert_eq!(graph.weight(NodeId(1), NodeId(2)), Some(4.0));
        assert_eq!(graph.neighbors(NodeId(1)).len(), 2);
    }

    proptest! {
        // Undirected round-trip: every edge shows up in both endpoint
        // rows, annotated with its weight.
        #[test]
        fn undirected_build_is_symmetric(
            raw in prop::collection::vec((0u64..8, 0u64..8, 1u32..20), 0..24)
        ) {
            let all = nodes(&[0, 1, 2, 3, 4, 5, 6, 7]);
            let edges: Vec<Edge> = raw
                .iter()
                .map(|&(a, b, w)| Edge::new(NodeId(a), NodeId(b), f64::from(w)))
                .collect();
            let graph = Graph::build(&all, &edges, false);

            for edge in &edges {
                let label_to = format!("{}({})", edge.to, edge.weight);
                let label_from = format!("{}({})", edge.from, edge.weight);
                let rows = graph.adjacency_rows();
                let row_from = rows.iter().find(|r| r.node == edge.from).unwrap();
                let row_to = rows.iter().find(|r| r.node == edge.to).unwrap();
                prop_assert!(row_from.neighbors.contains(&label_to));
                prop_assert!(row_to.neighbors.contains(&label_from));
            }
        }

        #[test]
        fn every_node_is_a_key(ids in prop::collection::btree_set(0u64..100, 0..20)) {
            let list: Vec<u64> = ids.iter().copied().collect();
            let graph = Graph::build(&nodes(&list), &[], false);
            prop_assert_eq!(graph.len(), list.len());
            for id in list {
                prop_assert!(graph.contains(NodeId(id)));
            }
        }
    }
}
