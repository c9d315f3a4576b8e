// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Node;
use std::collections::HashMap;

/// Represents an [OSM way](https://wiki.openstreetmap.org/wiki/Way):
/// an ordered polyline of node references plus descriptive tags.
///
/// Ways are transient: once the builder has either committed or
/// discarded one, only its effect on the [Graph](crate::Graph) survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub tags: HashMap<String, String>,
}

/// Union over the [OSM features/elements](https://wiki.openstreetmap.org/wiki/Elements)
/// the road graph is built from. Relations carry no road geometry and
/// are skipped by the reader.
#[derive(Debug, Clone)]
pub enum Feature {
    Node(Node),
    Way(Way),
}
