//! The externally observable slice of playback state.
//!
//! Presentation renders frames; it never computes them. Everything in
//! here is a copy of controller state at the moment of conversion, so a
//! frame stays coherent even while playback advances behind it.

use serde::Serialize;

use wayfind_graph::NodeId;
use wayfind_search::{Algorithm, QueueEntry, TableRow};

use crate::playback::{Playback, PlaybackState};

/// The edge traversed into the highlighted node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightEdge {
    pub from: NodeId,
    pub to: NodeId,
}

/// What the presentation layer should emphasize right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// The node just visited
    pub node: NodeId,
    /// The edge it was reached through, absent for a search's first step
    pub edge: Option<HighlightEdge>,
    /// Adjacent nodes at the moment of visiting
    pub neighbors: Vec<NodeId>,
    /// Flicker phase, alternating every advancement
    pub blink: bool,
}

/// Everything a renderer needs to draw the current playback instant.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackFrame {
    pub state: PlaybackState,
    pub cursor: usize,
    pub total_steps: usize,
    pub algorithm: Option<Algorithm>,
    pub highlight: Option<Highlight>,
    /// Bookkeeping table as of the last applied step
    pub table: Vec<TableRow>,
    /// Frontier snapshot as of the last applied step
    pub queue: Vec<QueueEntry>,
    /// Every frontier entry seen so far, first appearance per node wins
    pub queue_history: Vec<QueueEntry>,
    pub log: Vec<String>,
    pub path: Option<Vec<NodeId>>,
    pub distance: Option<f64>,
}

impl From<&Playback> for PlaybackFrame {
    fn from(playback: &Playback) -> Self {
        Self {
            state: playback.state(),
            cursor: playback.cursor(),
            total_steps: playback.total_steps(),
            algorithm: playback.algorithm(),
            highlight: playback.highlight().cloned(),
            table: playback.table().to_vec(),
            queue: playback.queue().to_vec(),
            queue_history: playback.queue_history(),
            log: playback.log().to_vec(),
            path: playback.path().map(<[NodeId]>::to_vec),
            distance: playback.distance(),
        }
    }
}
