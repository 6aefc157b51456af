//! Wayfind Search
//!
//! BFS, Dijkstra, and A* over a weighted graph, each recording a
//! deterministic, replayable step trace.
//!
//! # Recording model
//!
//! A search runs to completion synchronously and appends one [`Step`]
//! per visited node: a sorted snapshot of the open frontier, the
//! per-node bookkeeping table, the node and the node it was reached
//! from, its adjacency, and a one-line log. Playback animates the
//! trace rather than the search, so replay never recomputes anything,
//! and identical inputs always produce identical traces.
//!
//! # Usage
//!
//! ```
//! use wayfind_graph::{Edge, Graph, Node, NodeId};
//! use wayfind_search::Algorithm;
//!
//! let nodes = vec![
//!     Node::new(NodeId(1), 0.0, 0.0),
//!     Node::new(NodeId(2), 1.0, 0.0),
//!     Node::new(NodeId(3), 2.0, 0.0),
//! ];
//! let edges = [
//!     Edge::new(NodeId(1), NodeId(2), 4.0),
//!     Edge::new(NodeId(2), NodeId(3), 1.0),
//!     Edge::new(NodeId(1), NodeId(3), 10.0),
//! ];
//! let graph = Graph::build(&nodes, &edges, false);
//!
//! let result = Algorithm::Dijkstra.run(&graph, NodeId(1), NodeId(3), &nodes);
//! assert_eq!(result.path, Some(vec![NodeId(1), NodeId(2), NodeId(3)]));
//! assert_eq!(result.distance, Some(5.0));
//! ```

pub mod astar;
pub mod bfs;
pub mod dijkstra;

mod algorithm;
mod error;
mod heap;
mod table;
mod trace;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use heap::{HeapEntry, MinHeap};
pub use trace::{QueueEntry, SearchResult, Step, TableRow};
