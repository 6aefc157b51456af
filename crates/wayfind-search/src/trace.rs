//! The recorded execution history a search hands to playback.
//!
//! A search runs to completion before anything animates, appending one
//! [`Step`] per visited node. Steps are plain data: the playback
//! controller replays them without ever re-running the search, and the
//! presentation layer renders them without computing anything.

use serde::{Deserialize, Serialize};
use wayfind_graph::NodeId;

/// One displayable frontier item.
///
/// `label` is what the queue panel shows: `"<node>(<score>)"` with the
/// score rendered to two decimals for the heap-based searches, or the
/// path-so-far joined with `"→"` for BFS. `node` identifies the entry
/// (the path's tip for BFS) so the playback controller can key its
/// cumulative first-seen aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub node: NodeId,
    pub label: String,
}

/// One row of the per-node bookkeeping table.
///
/// `distance: None` means no finite distance is known (rendered "∞" for
/// Dijkstra, "-" where distance is untracked); `parent: None` renders
/// "-"; `neighbors` stays empty for the searches that do not record
/// adjacency in their tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub node: NodeId,
    pub distance: Option<f64>,
    pub parent: Option<NodeId>,
    pub neighbors: Vec<NodeId>,
}

/// One recorded instant of a search: the node just visited, where it
/// came from, its adjacency, and snapshots of the frontier and the
/// bookkeeping table at that moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub queue: Vec<QueueEntry>,
    pub table: Vec<TableRow>,
    pub current: NodeId,
    pub previous: Option<NodeId>,
    pub neighbors: Vec<NodeId>,
    pub log: String,
}

/// The complete outcome of one search invocation.
///
/// `path` and `distance` are `None` together when the target is
/// unreachable; `steps` is always present, so a failed search still
/// animates up to the point the frontier drained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub steps: Vec<Step>,
    pub path: Option<Vec<NodeId>>,
    pub distance: Option<f64>,
}

impl SearchResult {
    /// A successful search.
    pub fn found(steps: Vec<Step>, path: Vec<NodeId>, distance: f64) -> Self {
        Self {
            steps,
            path: Some(path),
            distance: Some(distance),
        }
    }

    /// An exhausted search: the trace survives, the path does not exist.
    pub fn not_found(steps: Vec<Step>) -> Self {
        Self {
            steps,
            path: None,
            distance: None,
        }
    }

    /// True when a path was found.
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}
