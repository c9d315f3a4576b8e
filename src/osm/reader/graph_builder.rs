// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{planar_distance, Edge, Graph, Node};

use super::{model, Error, Options};

/// Helper object used for storing state related to converting
/// [OSM features](super::model::Feature) into a [Graph].
///
/// The builder is one-shot: it consumes the whole feature stream, and
/// only when that succeeds is the graph fit to be shared with readers.
/// Any failure leaves the caller holding a half-built graph which must
/// be thrown away, never served.
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    options: &'a Options<'a>,

    /// Every point seen in the extract, road or not. Way references are
    /// resolved against this table, not against the graph, which holds
    /// only nodes of accepted roads.
    nodes: HashMap<i64, Node>,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(g: &'a mut Graph, options: &'a Options<'a>) -> Self {
        Self {
            g,
            options,
            nodes: HashMap::default(),
        }
    }

    /// Add all features from the provided stream, then drop the
    /// working node table.
    pub(super) fn add_features<I>(mut self, features: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Result<model::Feature, quick_xml::Error>>,
    {
        for f in features {
            self.add_feature(f?)?;
        }

        log::info!(
            "road graph has {} nodes ({} points in the extract)",
            self.g.len(),
            self.nodes.len()
        );
        Ok(())
    }

    fn add_feature(&mut self, f: model::Feature) -> Result<(), Error> {
        match f {
            model::Feature::Node(n) => {
                self.nodes.insert(n.id, n);
                Ok(())
            }
            model::Feature::Way(w) => self.add_way(w),
        }
    }

    /// Commits a way to the graph if its `highway` tag is in the
    /// allow-list: all its nodes join the graph, and each pair of
    /// consecutive nodes is connected with a bidirectional edge costed
    /// by the [planar metric](planar_distance). Any other way is
    /// discarded without a trace.
    fn add_way(&mut self, w: model::Way) -> Result<(), Error> {
        if !self.is_road(&w.tags) {
            log::debug!("discarding way {}: not an allowed road type", w.id);
            return Ok(());
        }

        let nodes = self.resolve_way_nodes(&w)?;

        for n in &nodes {
            self.g.set_node(*n);
        }

        for pair in nodes.windows(2) {
            let cost = planar_distance(pair[0].lon, pair[0].lat, pair[1].lon, pair[1].lat);
            self.g.set_edge(pair[0].id, Edge { to: pair[1].id, cost });
            self.g.set_edge(pair[1].id, Edge { to: pair[0].id, cost });
        }

        Ok(())
    }

    fn is_road(&self, tags: &HashMap<String, String>) -> bool {
        tags.get("highway")
            .is_some_and(|v| self.options.road_types.contains(&v.as_str()))
    }

    /// Resolves a way's node references against the working table.
    /// A reference to a point the extract never defined is a
    /// data-integrity error which fails the whole build; silently
    /// dropping the reference would corrupt the road's connectivity.
    fn resolve_way_nodes(&self, w: &model::Way) -> Result<Vec<Node>, Error> {
        w.nodes
            .iter()
            .map(|&ref_| {
                self.nodes
                    .get(&ref_)
                    .copied()
                    .ok_or(Error::UnknownNodeRef { way: w.id, node: ref_ })
            })
            .collect()
    }
}
