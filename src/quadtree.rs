// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Side length of every pre-rendered tile image, in pixels.
pub const TILE_SIZE: u32 = 256;

/// Subdivision depth used for the reference region's tile set,
/// giving 4^7 = 16384 leaf tiles.
pub const DEFAULT_MAX_DEPTH: u8 = 7;

/// A rectangle in lon-lat space, described by its upper-left and
/// lower-right corners. Longitude is the x-axis, latitude the y-axis,
/// so `ullon <= lrlon` and `ullat >= lrlat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub ullon: f64,
    pub ullat: f64,
    pub lrlon: f64,
    pub lrlat: f64,
}

impl BBox {
    /// Checks whether two rectangles intersect. Boundary touching
    /// counts as an intersection.
    pub fn intersects(&self, other: &BBox) -> bool {
        self.ullon <= other.lrlon
            && other.ullon <= self.lrlon
            && self.ullat >= other.lrlat
            && other.ullat >= self.lrlat
    }

    /// Longitude span of the rectangle, in degrees.
    pub fn lon_span(&self) -> f64 {
        self.lrlon - self.ullon
    }
}

/// A fixed-depth quaternary subdivision of the region's bounding
/// rectangle, used to pick the minimal resolution-correct set of
/// pre-rendered tiles covering a query rectangle.
///
/// Every non-leaf node has exactly four children partitioning its
/// rectangle into equal quadrants, in the fixed order top-left,
/// top-right, bottom-left, bottom-right. Each node is addressable by
/// the path of quadrant choices from the root, as a string of digits
/// '1' through '4'; the root's address is the empty string. The same
/// addresses name the tile images in the external tile store.
///
/// The whole tree is materialized eagerly at startup and immutable
/// afterwards, so it may be shared freely across concurrent readers.
#[derive(Debug, Clone)]
pub struct QuadTree {
    bbox: BBox,
    address: String,
    depth: u8,
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    /// Builds the full tree over the region's outer bounds,
    /// subdividing down to `max_depth`.
    pub fn new(bbox: BBox, max_depth: u8) -> Self {
        Self::build(bbox, String::new(), 0, max_depth)
    }

    fn build(bbox: BBox, address: String, depth: u8, max_depth: u8) -> Self {
        let children = if depth < max_depth {
            let mid_lon = (bbox.ullon + bbox.lrlon) / 2.0;
            let mid_lat = (bbox.ullat + bbox.lrlat) / 2.0;

            let quadrants = [
                // top-left
                BBox {
                    ullon: bbox.ullon,
                    ullat: bbox.ullat,
                    lrlon: mid_lon,
                    lrlat: mid_lat,
                },
                // top-right
                BBox {
                    ullon: mid_lon,
                    ullat: bbox.ullat,
                    lrlon: bbox.lrlon,
                    lrlat: mid_lat,
                },
                // bottom-left
                BBox {
                    ullon: bbox.ullon,
                    ullat: mid_lat,
                    lrlon: mid_lon,
                    lrlat: bbox.lrlat,
                },
                // bottom-right
                BBox {
                    ullon: mid_lon,
                    ullat: mid_lat,
                    lrlon: bbox.lrlon,
                    lrlat: bbox.lrlat,
                },
            ];

            let mut i = 0u8;
            Some(Box::new(quadrants.map(|q| {
                i += 1;
                let mut child_address = String::with_capacity(address.len() + 1);
                child_address.push_str(&address);
                child_address.push(char::from(b'0' + i));
                Self::build(q, child_address, depth + 1, max_depth)
            })))
        } else {
            None
        };

        Self {
            bbox,
            address,
            depth,
            children,
        }
    }

    /// The rectangle this tile covers.
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// The tile's address: the path of quadrant choices from the root,
    /// one digit '1'-'4' per level. Empty for the root.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Number of subdivisions between the root and this tile.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Returns `true` for tiles at the maximum depth.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The tile's own resolution: longitude degrees represented by one
    /// of its pixels.
    pub fn resolution(&self) -> f64 {
        self.bbox.lon_span() / TILE_SIZE as f64
    }

    /// Selects the set of tiles covering the intersection of `query`
    /// with the indexed region, at the coarsest resolution that is still
    /// at least as fine as `target_resolution` (longitude degrees per
    /// output pixel).
    ///
    /// A tile intersecting the query is emitted as soon as it is a leaf
    /// or its own [resolution](Self::resolution) satisfies the target;
    /// otherwise its four children are visited in quadrant order.
    /// The returned tiles cover the clipped query exactly, each
    /// appearing once. An empty result means the query rectangle lies
    /// entirely outside the region.
    pub fn select(&self, query: &BBox, target_resolution: f64) -> Vec<&QuadTree> {
        let mut selected = Vec::new();
        if self.bbox.intersects(query) {
            self.collect(query, target_resolution, &mut selected);
        }
        selected
    }

    fn collect<'a>(&'a self, query: &BBox, target_resolution: f64, out: &mut Vec<&'a QuadTree>) {
        match &self.children {
            Some(children) if self.resolution() > target_resolution => {
                for child in children.iter() {
                    if child.bbox.intersects(query) {
                        child.collect(query, target_resolution, out);
                    }
                }
            }
            _ => out.push(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: BBox = BBox {
        ullon: 0.0,
        ullat: 4.0,
        lrlon: 4.0,
        lrlat: 0.0,
    };

    /// Resolution of a tile at `depth` in the test region.
    fn res_at(depth: u8) -> f64 {
        BOUNDS.lon_span() / (1 << depth) as f64 / TILE_SIZE as f64
    }

    #[test]
    fn test_tree_is_perfect_down_to_max_depth() {
        fn check(t: &QuadTree, max_depth: u8) -> usize {
            assert_eq!(t.is_leaf(), t.depth() == max_depth);
            assert_eq!(t.address().len(), t.depth() as usize);
            match &t.children {
                Some(children) => children.iter().map(|c| check(c, max_depth)).sum(),
                None => 1,
            }
        }

        let tree = QuadTree::new(BOUNDS, 3);
        assert_eq!(check(&tree, 3), 64); // 4^3 leaves
    }

    #[test]
    fn test_children_partition_the_parent() {
        let tree = QuadTree::new(BOUNDS, 1);
        let children = tree.children.as_ref().unwrap();

        assert_eq!(children[0].address(), "1");
        assert_eq!(children[1].address(), "2");
        assert_eq!(children[2].address(), "3");
        assert_eq!(children[3].address(), "4");

        // top-left
        assert_eq!(
            children[0].bbox(),
            BBox {
                ullon: 0.0,
                ullat: 4.0,
                lrlon: 2.0,
                lrlat: 2.0
            }
        );
        // bottom-right
        assert_eq!(
            children[3].bbox(),
            BBox {
                ullon: 2.0,
                ullat: 2.0,
                lrlon: 4.0,
                lrlat: 0.0
            }
        );
    }

    #[test]
    fn test_select_coarse_returns_just_the_root() {
        let tree = QuadTree::new(BOUNDS, 3);
        let selected = tree.select(&BOUNDS, res_at(0));

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].address(), "");
    }

    #[test]
    fn test_select_whole_region_one_level_down() {
        let tree = QuadTree::new(BOUNDS, 3);
        let selected = tree.select(&BOUNDS, res_at(1));

        let addresses: Vec<&str> = selected.iter().map(|t| t.address()).collect();
        assert_eq!(addresses, ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_select_outside_region_is_empty() {
        let tree = QuadTree::new(BOUNDS, 3);
        let query = BBox {
            ullon: 10.0,
            ullat: 14.0,
            lrlon: 14.0,
            lrlat: 10.0,
        };

        assert!(tree.select(&query, res_at(3)).is_empty());
    }

    #[test]
    fn test_select_boundary_touching_counts() {
        let tree = QuadTree::new(BOUNDS, 1);
        // A degenerate query at the exact center touches all four quadrants.
        let query = BBox {
            ullon: 2.0,
            ullat: 2.0,
            lrlon: 2.0,
            lrlat: 2.0,
        };

        assert_eq!(tree.select(&query, res_at(1)).len(), 4);
    }

    #[test]
    fn test_select_covers_the_clipped_query_exactly() {
        let tree = QuadTree::new(BOUNDS, 2);
        // Query sticks out of the region to the east: only the part
        // within the bounds must be covered.
        let query = BBox {
            ullon: 1.25,
            ullat: 2.75,
            lrlon: 5.0,
            lrlat: 1.25,
        };
        let selected = tree.select(&query, res_at(2));

        // Tiles at depth 2 are 1x1 degrees: the clipped query needs a
        // 2-row, 3-column grid of them.
        assert_eq!(selected.len(), 6);

        let mut area = 0.0;
        for (i, tile) in selected.iter().enumerate() {
            let b = tile.bbox();
            area += b.lon_span() * (b.ullat - b.lrlat);

            // No tile lies strictly outside the query, and no two
            // selected tiles overlap more than a shared boundary.
            assert!(b.intersects(&query));
            for other in &selected[i + 1..] {
                let o = other.bbox();
                assert!(!(b.ullon < o.lrlon
                    && o.ullon < b.lrlon
                    && b.lrlat < o.ullat
                    && o.lrlat < b.ullat));
            }
        }
        assert_eq!(area, 6.0);
    }
}
