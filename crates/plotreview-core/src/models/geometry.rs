//! Coordinate and bounding-box types shared by every plotreview crate.
//!
//! Rings are kept in the map convention, `(latitude, longitude)`. Conversion
//! to and from the longitude-first WKT convention happens in `plotreview-geo`.

use serde::{Deserialize, Serialize};

/// A single vertex in map order.
///
/// Serializes as a `[lat, lon]` array, which is what the map UI consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite (no NaN, no infinity).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Convert to a `geo` coordinate, where x is longitude and y is latitude.
    pub fn to_coord(self) -> geo::Coord<f64> {
        geo::Coord { x: self.lon, y: self.lat }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(point: LatLng) -> Self {
        [point.lat, point.lon]
    }
}

/// Axis-aligned bounding box of a ring, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    /// Lower-left corner as `[lon, lat]`
    pub fn lower(&self) -> [f64; 2] {
        [self.min_lon, self.min_lat]
    }

    /// Upper-right corner as `[lon, lat]`
    pub fn upper(&self) -> [f64; 2] {
        [self.max_lon, self.max_lat]
    }

    /// Grow the box so it also covers `point`.
    pub fn expand(&mut self, point: LatLng) {
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lat = self.max_lat.max(point.lat);
        self.min_lon = self.min_lon.min(point.lon);
        self.max_lon = self.max_lon.max(point.lon);
    }

    /// Closed-interval intersection test on both axes.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let lon_overlap = self.min_lon <= other.max_lon && self.max_lon >= other.min_lon;
        let lat_overlap = self.min_lat <= other.max_lat && self.max_lat >= other.min_lat;

        lon_overlap && lat_overlap
    }
}

impl From<LatLng> for BoundingBox {
    fn from(point: LatLng) -> Self {
        Self::new(point.lat, point.lat, point.lon, point.lon)
    }
}
