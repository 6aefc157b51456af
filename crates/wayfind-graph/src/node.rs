//! Node and edge primitives.
//!
//! Nodes carry plane coordinates because the editor places them on a
//! canvas; only the A* heuristic ever interprets those coordinates, the
//! searches themselves treat nodes as opaque ids.

use std::fmt;

/// A unique node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A node placed on the editor plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Create a node at the given position.
    pub const fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Straight-line distance to another node.
    ///
    /// ```
    /// use wayfind_graph::{Node, NodeId};
    ///
    /// let a = Node::new(NodeId(1), 0.0, 0.0);
    /// let b = Node::new(NodeId(2), 3.0, 4.0);
    /// assert_eq!(a.distance_to(&b), 5.0);
    /// ```
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A weighted edge between two nodes.
///
/// Weights must be positive and finite. Zero and negative weights are
/// outside the supported domain; the builder does not check for them and
/// the searches assume relaxation never cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    /// Create an edge.
    pub const fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Self { from, to, weight }
    }
}
