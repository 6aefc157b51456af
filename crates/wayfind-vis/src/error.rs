//! Error types for playback control.

use thiserror::Error;

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported to the user before a search starts.
///
/// An unreachable target is not an error: the search still returns a
/// trace and playback animates it, the result just carries no path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A search needs both endpoints chosen before it can start.
    #[error("select both a source and a target node")]
    EndpointsMissing,

    /// Source and target refer to the same node.
    #[error("source and target must be different nodes")]
    EndpointsIdentical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            Error::EndpointsMissing.to_string(),
            "select both a source and a target node"
        );
        assert_eq!(
            Error::EndpointsIdentical.to_string(),
            "source and target must be different nodes"
        );
    }
}
