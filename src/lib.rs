// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Tile rastering and routing over a fixed, pre-downloaded
//! [OpenStreetMap](https://www.openstreetmap.org/) extract.
//!
//! The crate answers two queries over a single static region:
//! which pre-rendered tiles cover a viewport at a given resolution
//! (via a fixed-depth [QuadTree] and [raster::plan]), and what is the
//! shortest path between two coordinates over the road network
//! (via [route::find_route], with memoization in [route::RouteCache]).
//!
//! The road [Graph] is built once at startup from an OSM XML extract,
//! keeping only ways whose `highway` tag is in a configurable allow-list,
//! and is read-only afterwards. All distances use a planar Euclidean
//! approximation on raw degrees; see [planar_distance].
//!
//! # Example
//!
//! ```no_run
//! let mut g = quadmap::Graph::default();
//! let options = quadmap::osm::Options {
//!     road_types: quadmap::osm::DEFAULT_ROAD_TYPES,
//!     file_format: quadmap::osm::FileFormat::Xml,
//! };
//! quadmap::osm::add_features_from_file(&mut g, &options, "region.osm")
//!     .expect("failed to load region.osm");
//!
//! let start = g.find_nearest_node(-122.257, 37.871).unwrap();
//! let end = g.find_nearest_node(-122.252, 37.868).unwrap();
//! let path = quadmap::route::find_route(&g, start.id, end.id)
//!     .expect("no route between the two points");
//!
//! println!("Route: {:?}", path);
//! ```

mod distance;
mod graph;
pub mod osm;
mod quadtree;
pub mod raster;
pub mod route;

pub use distance::planar_distance;
pub use graph::Graph;
pub use quadtree::{BBox, QuadTree, DEFAULT_MAX_DEPTH, TILE_SIZE};

/// Represents a vertex of the road network [Graph].
///
/// Node ids come straight from the source dataset and are unique
/// within a [Graph]. Positions are raw degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
}

/// Represents an outgoing connection from a specific [Node].
///
/// `cost` is the planar distance between the two endpoints, precomputed
/// when the owning way is committed to the [Graph]. Roads are walkable in
/// both directions, so every edge has a mirror stored under the other node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: i64,
    pub cost: f64,
}
