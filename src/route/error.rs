// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions which may occur during [route](super::route) or
/// [find_route](super::find_route).
///
/// Both are deterministic functions of the query and the static graph,
/// so retrying a failed request can never succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Nearest-node snapping was attempted on a graph with no nodes.
    /// This indicates a startup failure upstream: the extract contained
    /// no accepted roads at all.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The start and end nodes lie in different connected components
    /// of the road network.
    #[error("no route between nodes {from} and {to}")]
    Unreachable { from: i64, to: i64 },
}
