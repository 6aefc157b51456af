//! Algorithm selection and dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wayfind_graph::{Graph, Node, NodeId};

use crate::error::Error;
use crate::trace::SearchResult;
use crate::{astar, bfs, dijkstra};

/// The closed set of supported searches.
///
/// Selection happens once, when a run is configured; an unrecognized
/// name fails there instead of silently falling back to some default
/// inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    /// Run the selected search.
    ///
    /// `nodes` supplies coordinates for the A* heuristic; the other two
    /// searches ignore it.
    pub fn run(
        &self,
        graph: &Graph,
        source: NodeId,
        target: NodeId,
        nodes: &[Node],
    ) -> SearchResult {
        match self {
            Algorithm::Bfs => bfs::shortest_path(graph, source, target),
            Algorithm::Dijkstra => dijkstra::shortest_path(graph, source, target),
            Algorithm::AStar => astar::shortest_path(graph, source, target, nodes),
        }
    }

    /// The selector string as the configuration surface spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Algorithm::Bfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" => Ok(Algorithm::AStar),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}
