// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Mosaic assembly planning: turns a viewport request into the ordered
//! list of tile addresses the external tile store must composite,
//! together with the mosaic's true bounds and pixel dimensions.

use crate::{BBox, QuadTree, TILE_SIZE};

/// The plan for one rastered mosaic.
///
/// `tiles` is in row-major order (north-to-south rows, west-to-east
/// within a row), ready to be pasted left-to-right, top-to-bottom onto
/// a `width` by `height` pixel canvas. `bounds` is the geographic
/// rectangle the mosaic actually covers, which is at least as large as
/// the query rectangle clipped to the region.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPlan {
    pub tiles: Vec<String>,
    pub bounds: BBox,
    pub width: u32,
    pub height: u32,

    /// Quadtree depth of the selected tiles, equal to the length of
    /// each address in `tiles`.
    pub depth: u8,
}

/// Plans the mosaic covering `query` for a viewport of the given pixel
/// dimensions.
///
/// The target resolution is the query's longitude span divided by the
/// viewport width; the selected tiles are the coarsest ones at least
/// that fine. Returns `None` when the query rectangle does not
/// intersect the indexed region at all (no coverage), or when the
/// viewport is degenerate.
pub fn plan(
    tree: &QuadTree,
    query: &BBox,
    viewport_width: u32,
    viewport_height: u32,
) -> Option<RasterPlan> {
    if viewport_width == 0 || viewport_height == 0 {
        return None;
    }

    let target_resolution = query.lon_span() / viewport_width as f64;
    let mut selected = tree.select(query, target_resolution);
    if selected.is_empty() {
        return None;
    }

    // Row-major order: upper-left latitude descending, then
    // upper-left longitude ascending.
    selected.sort_by(|a, b| {
        b.bbox()
            .ullat
            .total_cmp(&a.bbox().ullat)
            .then(a.bbox().ullon.total_cmp(&b.bbox().ullon))
    });

    // The selection forms a uniform rectangular grid (guaranteed by the
    // quadtree subdivision), so the distinct upper-left corner
    // coordinates give the grid dimensions.
    let rows = distinct_count(selected.iter().map(|t| t.bbox().ullat));
    let columns = distinct_count(selected.iter().map(|t| t.bbox().ullon));

    let first = selected.first()?.bbox();
    let last = selected.last()?.bbox();

    Some(RasterPlan {
        depth: selected[0].depth(),
        tiles: selected.iter().map(|t| t.address().to_string()).collect(),
        bounds: BBox {
            ullon: first.ullon,
            ullat: first.ullat,
            lrlon: last.lrlon,
            lrlat: last.lrlat,
        },
        width: columns as u32 * TILE_SIZE,
        height: rows as u32 * TILE_SIZE,
    })
}

fn distinct_count<I: Iterator<Item = f64>>(values: I) -> usize {
    let mut bits: Vec<u64> = values.map(f64::to_bits).collect();
    bits.sort_unstable();
    bits.dedup();
    bits.len()
}
