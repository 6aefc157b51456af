//! Wayfind Graph Model
//!
//! Weighted graph primitives for the wayfind pathfinding visualizer.
//!
//! The editor hands over a node list, an edge list, and a directed flag;
//! [`Graph::build`] turns those into an adjacency mapping that the search
//! crate walks and the adjacency view renders. The mapping is immutable
//! for the lifetime of a search, and its key order is deterministic
//! (ascending id) so recorded traces replay byte-for-byte.
//!
//! # Usage
//!
//! ```
//! use wayfind_graph::{Edge, Graph, Node, NodeId};
//!
//! let nodes = [
//!     Node::new(NodeId(1), 0.0, 0.0),
//!     Node::new(NodeId(2), 3.0, 0.0),
//! ];
//! let edges = [Edge::new(NodeId(1), NodeId(2), 4.0)];
//!
//! let graph = Graph::build(&nodes, &edges, false);
//! assert_eq!(graph.neighbor_ids(NodeId(1)), vec![NodeId(2)]);
//! ```

mod graph;
mod node;

pub use graph::{AdjacencyRow, Graph, Neighbor};
pub use node::{Edge, Node, NodeId};
