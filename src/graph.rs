// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{planar_distance, Edge, Node};
use std::collections::btree_map::{BTreeMap, Entry};

/// Represents the routable road network as a set of [Nodes](Node)
/// and [Edges](Edge) between them.
///
/// The graph holds only nodes that lie on at least one accepted road;
/// it is populated once by [osm::add_features_from_io](crate::osm::add_features_from_io)
/// and treated as read-only afterwards, so it may be shared freely
/// across concurrent request handlers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<i64, (Node, Vec<Edge>)>);

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph,
    /// in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.iter().map(|(_, (node, _))| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<Node> {
        self.0.get(&id).map(|&(node, _)| node)
    }

    /// Creates or updates a [Node] with `node.id`.
    /// All outgoing and incoming edges are preserved.
    pub fn set_node(&mut self, node: Node) {
        match self.0.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert((node, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                debug_assert_eq!(e.get().0.id, node.id);
                e.get_mut().0 = node;
            }
        }
    }

    /// Finds the [Node] closest to the given position under the
    /// [planar metric](planar_distance). Ties are broken towards the
    /// lowest node id, so the result is reproducible.
    ///
    /// This function computes the distance to every [Node] in the graph.
    /// Returns `None` only when the graph is empty.
    pub fn find_nearest_node(&self, lon: f64, lat: f64) -> Option<Node> {
        self.0
            .values()
            .map(|&(nd, _)| (planar_distance(lon, lat, nd.lon, nd.lat), nd))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)))
            .map(|(_, nd)| nd)
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id.
    pub fn get_edges(&self, from_id: i64) -> &[Edge] {
        self.0
            .get(&from_id)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the cost of an [Edge] from one node to another.
    /// If such an edge doesn't exist, returns [f64::INFINITY].
    pub fn get_edge(&self, from_id: i64, to_id: i64) -> f64 {
        self.0
            .get(&from_id)
            .and_then(|(_, e)| {
                e.iter().find_map(|edge| {
                    if edge.to == to_id {
                        Some(edge.cost)
                    } else {
                        None
                    }
                })
            })
            .unwrap_or(f64::INFINITY)
    }

    /// Creates or updates an [Edge] from a node with a given id.
    ///
    /// Self-loops are never stored: a node's adjacency must not contain
    /// the node itself. The `from` node must already exist in the graph.
    pub fn set_edge(&mut self, from_id: i64, edge: Edge) {
        if from_id == edge.to {
            return;
        }

        if let Some((_, edges)) = self.0.get_mut(&from_id) {
            if let Some(candidate) = edges.iter_mut().find(|e| e.to == edge.to) {
                *candidate = edge;
            } else {
                edges.push(edge);
            }
        }
    }
}
