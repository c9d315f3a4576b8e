// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod cache;
mod dijkstra;
mod error;

pub use cache::RouteCache;
pub use dijkstra::find_route;
pub use error::RouteError;

use crate::Graph;

/// The four coordinates identifying one route request, and the key
/// under which its result is memoized.
///
/// Two queries are the same only if all four coordinates match down to
/// the exact bit pattern; there is no rounding or tolerance. This means
/// `0.0` and `-0.0` are distinct keys, even though they snap to the
/// same node.
#[derive(Debug, Clone, Copy)]
pub struct RouteQuery {
    pub start_lon: f64,
    pub start_lat: f64,
    pub end_lon: f64,
    pub end_lat: f64,
}

impl RouteQuery {
    fn key(&self) -> [u64; 4] {
        [
            self.start_lon.to_bits(),
            self.start_lat.to_bits(),
            self.end_lon.to_bits(),
            self.end_lat.to_bits(),
        ]
    }
}

impl PartialEq for RouteQuery {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RouteQuery {}

impl std::hash::Hash for RouteQuery {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Snaps both endpoints of the query to their nearest road nodes and
/// finds the shortest path between them.
///
/// Returns the ordered node ids from the node nearest the start
/// coordinate to the node nearest the end coordinate, inclusive.
/// Fails with [RouteError::EmptyGraph] when there is no node to snap
/// to, and with [RouteError::Unreachable] when the two endpoints lie
/// in different connected components.
pub fn route(g: &Graph, query: &RouteQuery) -> Result<Vec<i64>, RouteError> {
    let start = g
        .find_nearest_node(query.start_lon, query.start_lat)
        .ok_or(RouteError::EmptyGraph)?;
    let end = g
        .find_nearest_node(query.end_lon, query.end_lat)
        .ok_or(RouteError::EmptyGraph)?;

    find_route(g, start.id, end.id)
}
