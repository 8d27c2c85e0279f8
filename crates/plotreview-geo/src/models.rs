//! Geometry models for plotreview-geo.
//!
//! This module re-exports canonical types from `plotreview-core` and provides
//! conversions to the `geo` crate, which works in `(x = lon, y = lat)`.

use geo::{LineString, Polygon};

// Re-export canonical types from plotreview-core
pub use plotreview_core::models::{BoundingBox, LatLng};

/// Build a `geo` polygon from a map-order ring.
///
/// `geo` closes the exterior ring itself when the last point differs from the first.
pub fn ring_to_polygon(coords: &[LatLng]) -> Polygon<f64> {
    let exterior: Vec<geo::Coord<f64>> = coords.iter().map(|point| point.to_coord()).collect();
    Polygon::new(LineString::new(exterior), vec![])
}

/// Copy of the ring with the first point appended when it is not already closed
pub fn closed_ring(coords: &[LatLng]) -> Vec<LatLng> {
    let mut ring = coords.to_vec();
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}
