// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io;
use std::path::Path;

use graph_builder::GraphBuilder;

use crate::Graph;

mod graph_builder;
mod model;
mod xml;

/// The road types used for routing, as values of the OSM `highway` tag.
///
/// Only non-service motor roads are allowed; this keeps routes off
/// footpaths and parking aisles as much as possible. In practice many
/// campus and residential areas tag walkable roads as motor roads
/// anyway, so pedestrian routing still works well enough.
pub const DEFAULT_ROAD_TYPES: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "residential",
    "living_street",
    "motorway_link",
    "trunk_link",
    "primary_link",
    "secondary_link",
    "tertiary_link",
];

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

/// Additional controls for interpreting OSM data as a road [Graph].
#[derive(Debug)]
pub struct Options<'a> {
    /// Allowed values of the `highway` tag. A way missing the tag, or
    /// carrying a value outside this list, contributes nothing to the
    /// graph. Usually [DEFAULT_ROAD_TYPES].
    pub road_types: &'a [&'a str],

    /// Format of the input data.
    pub file_format: FileFormat,
}

impl Default for Options<'static> {
    fn default() -> Self {
        Self {
            road_types: DEFAULT_ROAD_TYPES,
            file_format: FileFormat::Xml,
        }
    }
}

/// Error conditions which may occur when building a [Graph] from an
/// OSM extract. All of them are fatal to startup: a half-built graph
/// must never be served.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A way references a point the extract never defined.
    #[error("way {way} references unknown node {node}")]
    UnknownNodeRef { way: i64, node: i64 },
}

/// Parse OSM features from a reader into a [Graph] as per the provided
/// [Options].
///
/// The provided stream will be automatically wrapped in a buffered
/// reader when needed.
pub fn add_features_from_io<R: io::Read>(
    g: &mut Graph,
    options: &Options<'_>,
    reader: R,
) -> Result<(), Error> {
    match options.file_format {
        FileFormat::Xml => {
            let b = io::BufReader::new(reader);
            build(g, options, xml::features_from_io(b))
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            let b = io::BufReader::new(d);
            build(g, options, xml::features_from_io(b))
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            let b = io::BufReader::new(d);
            build(g, options, xml::features_from_io(b))
        }
    }
}

/// Parse OSM features from a file at the provided path into a [Graph]
/// as per the provided [Options].
pub fn add_features_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    options: &Options<'_>,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_features_from_io(g, options, f)
}

/// Parse OSM features from a static buffer into a [Graph] as per the
/// provided [Options].
pub fn add_features_from_buffer(
    g: &mut Graph,
    options: &Options<'_>,
    data: &[u8],
) -> Result<(), Error> {
    if options.file_format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        build(g, options, xml::features_from_buffer(data))
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let cursor = io::Cursor::new(data);
        add_features_from_io(g, options, cursor)
    }
}

fn build<I>(g: &mut Graph, options: &Options<'_>, features: I) -> Result<(), Error>
where
    I: IntoIterator<Item = Result<model::Feature, quick_xml::Error>>,
{
    GraphBuilder::new(g, options).add_features(features)
}
