//! ODK geoshape codec.
//!
//! Mobile forms submit polygons as `"lat lon alt acc; lat lon alt acc; ..."`,
//! latitude first, with altitude and accuracy optional.

use crate::codec::parse_wkt_polygon;
use crate::models::{closed_ring, LatLng};

/// Minimum number of points a geoshape needs to describe an area
const MIN_GEOSHAPE_POINTS: usize = 3;

/// How much of a rejected input is echoed into the log
const LOG_PREVIEW_CHARS: usize = 100;

/// Parse an ODK geoshape into a closed ring.
///
/// Returns `None` for empty input, for any segment that does not start with
/// two finite numbers, and for fewer than three points. The ring is closed
/// by repeating the first point when needed.
pub fn parse_odk_geoshape(input: &str) -> Option<Vec<LatLng>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut coords = Vec::new();
    for segment in trimmed.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        match parse_segment(segment) {
            Some(point) => coords.push(point),
            None => {
                let preview: String = input.chars().take(LOG_PREVIEW_CHARS).collect();
                tracing::warn!("Failed to parse ODK geoshape: {}", preview);
                return None;
            }
        }
    }

    if coords.len() < MIN_GEOSHAPE_POINTS {
        return None;
    }

    Some(closed_ring(&coords))
}

fn parse_segment(segment: &str) -> Option<LatLng> {
    let mut fields = segment.split_whitespace();
    let lat = fields.next()?.parse::<f64>().ok()?;
    let lon = fields.next()?.parse::<f64>().ok()?;

    let point = LatLng::new(lat, lon);
    point.is_finite().then_some(point)
}

/// Write a ring as an ODK geoshape with zero altitude and accuracy.
///
/// An empty ring produces an empty string.
pub fn to_odk_geoshape(coords: &[LatLng]) -> String {
    coords
        .iter()
        .map(|point| format!("{} {} 0 0", point.lat, point.lon))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convert stored WKT to the geoshape format expected by the collection server
pub fn wkt_to_odk_geoshape(wkt: &str) -> Option<String> {
    let coords = parse_wkt_polygon(wkt);
    if coords.is_empty() {
        return None;
    }
    Some(to_odk_geoshape(&coords))
}
