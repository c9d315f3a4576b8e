// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use super::RouteError;
use crate::{Edge, Graph};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: i64,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.at == other.at
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison, as cheaper items are
        // considered better ("higher") and Rust's BinaryHeap is a
        // max-heap. Equal costs compare by node id, lowest first, so
        // the expansion order is reproducible.
        other
            .cost
            .total_cmp(&self.cost)
            .then(other.at.cmp(&self.at))
    }
}

fn reconstruct_path(came_from: &HashMap<i64, i64>, mut last: i64) -> Vec<i64> {
    let mut path = vec![last];

    while let Some(&nd) = came_from.get(&last) {
        path.push(nd);
        last = nd;
    }

    path.reverse();
    return path;
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest route between two nodes in the provided graph,
/// returned as the ordered node ids from `from_id` to `to_id` inclusive.
///
/// The frontier is keyed by cumulative planar distance alone; there is
/// no heuristic term. The search stops as soon as the end node is
/// settled, rather than exhausting the whole component.
///
/// Returns [RouteError::Unreachable] when the frontier empties without
/// reaching `to_id`.
pub fn find_route(g: &Graph, from_id: i64, to_id: i64) -> Result<Vec<i64>, RouteError> {
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut known_costs: HashMap<i64, f64> = HashMap::default();

    queue.push(QueueItem {
        at: from_id,
        cost: 0.0,
    });
    known_costs.insert(from_id, 0.0);

    while let Some(item) = queue.pop() {
        if item.at == to_id {
            return Ok(reconstruct_path(&came_from, to_id));
        }

        // Contrary to the textbook definition, we might keep multiple
        // items in the queue for the same node; stale ones are skipped.
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for &Edge {
            to: neighbor_id,
            cost: edge_cost,
        } in g.get_edges(item.at)
        {
            // Check if this is the cheapest known way to the neighbor
            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost
                >= known_costs
                    .get(&neighbor_id)
                    .copied()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            came_from.insert(neighbor_id, item.at);
            known_costs.insert(neighbor_id, neighbor_cost);
            queue.push(QueueItem {
                at: neighbor_id,
                cost: neighbor_cost,
            });
        }
    }

    Err(RouteError::Unreachable {
        from: from_id,
        to: to_id,
    })
}
