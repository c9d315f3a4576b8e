// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Calculates the planar Euclidean distance between two lon-lat positions,
/// in raw degrees: `sqrt((lon1 - lon2)² + (lat1 - lat2)²)`.
///
/// This treats the region as a flat plane, which is geographically
/// inaccurate away from the equator, but internally consistent: the same
/// metric is used for nearest-node snapping, edge costs and path-cost
/// comparison, so shortest paths are unaffected by the distortion within
/// a single small region.
pub fn planar_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let dlon = lon1 - lon2;
    let dlat = lat1 - lat2;
    (dlon * dlon + dlat * dlat).sqrt()
}
