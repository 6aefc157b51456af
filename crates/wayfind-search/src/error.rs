//! Error types for wayfind-search.

use thiserror::Error;

/// Result type for search configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a search.
///
/// The searches themselves are total: disconnected graphs, absent ids,
/// and self-targets all produce results, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The algorithm selector named no known search.
    #[error("unknown algorithm \"{0}\" (expected bfs, dijkstra, or astar)")]
    UnknownAlgorithm(String),
}
