//! WKT polygon codec.
//!
//! Stored geometry is a single-ring `POLYGON((lon lat, lon lat, ...))` string,
//! longitude first. The map UI works with `(lat, lon)` pairs, so every
//! conversion here swaps the axes.
//!
//! Parsing never fails: absent, malformed or unsupported geometry yields an
//! empty ring, and individual malformed vertices are dropped while the rest of
//! the ring is kept. [`parse_wkt_polygon_report`] exposes how many vertices
//! were dropped.

use crate::models::{BoundingBox, LatLng};
use plotreview_core::error::{PlotError, Result};
use serde::Serialize;

const POLYGON_KEYWORD: &str = "POLYGON";

/// Result of parsing a WKT polygon, with the number of discarded vertex tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedRing {
    pub coords: Vec<LatLng>,
    pub dropped: usize,
}

impl ParsedRing {
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Parse a WKT polygon into `(lat, lon)` pairs.
///
/// Returns an empty ring for empty input, for anything that is not a
/// single-ring `POLYGON`, and for an empty body.
pub fn parse_wkt_polygon(wkt: &str) -> Vec<LatLng> {
    parse_wkt_polygon_report(wkt).coords
}

/// [`parse_wkt_polygon`] for a geometry column that may be null
pub fn parse_optional_wkt(wkt: Option<&str>) -> Vec<LatLng> {
    wkt.map(parse_wkt_polygon).unwrap_or_default()
}

/// Parse a WKT polygon and count the vertices that had to be dropped
pub fn parse_wkt_polygon_report(wkt: &str) -> ParsedRing {
    let Some(body) = polygon_body(wkt) else {
        return ParsedRing::default();
    };

    let mut coords = Vec::new();
    let mut dropped = 0;
    for token in body.split(',') {
        match parse_vertex(token) {
            Some(point) => coords.push(point),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = coords.len(), "Dropped malformed WKT polygon vertices");
    }

    ParsedRing { coords, dropped }
}

/// Extract the text between `POLYGON((` and `))`.
fn polygon_body(wkt: &str) -> Option<&str> {
    let text = wkt.trim();
    let keyword = text.get(..POLYGON_KEYWORD.len())?;
    if !keyword.eq_ignore_ascii_case(POLYGON_KEYWORD) {
        return None;
    }

    let rest = text[POLYGON_KEYWORD.len()..].trim_start();
    let rest = rest.strip_prefix('(')?.trim_start();
    let rest = rest.strip_prefix('(')?;
    let rest = rest.strip_suffix(')')?.trim_end();
    let body = rest.strip_suffix(')')?;

    // Interior rings and nested shapes are not modelled.
    if body.trim().is_empty() || body.contains(['(', ')']) {
        return None;
    }

    Some(body)
}

/// `"lon lat"` to a finite `(lat, lon)` pair; exactly two fields.
fn parse_vertex(token: &str) -> Option<LatLng> {
    let mut fields = token.split_whitespace();
    let lon = fields.next()?.parse::<f64>().ok()?;
    let lat = fields.next()?.parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let point = LatLng::new(lat, lon);
    point.is_finite().then_some(point)
}

/// Serialize `(lat, lon)` pairs to a WKT polygon.
///
/// An empty ring produces an empty string, which is not valid WKT: callers
/// must not persist it as geometry. The ring is written as given, with no
/// closure check.
pub fn to_wkt_polygon(coords: &[LatLng]) -> String {
    if coords.is_empty() {
        return String::new();
    }

    let ring = coords
        .iter()
        .map(|point| format!("{} {}", point.lon, point.lat))
        .collect::<Vec<_>>()
        .join(", ");

    format!("POLYGON(({}))", ring)
}

/// [`to_wkt_polygon`] for a ring that may be absent
pub fn to_optional_wkt(coords: Option<&[LatLng]>) -> String {
    coords.map(to_wkt_polygon).unwrap_or_default()
}

/// Axis-aligned bounding box of a ring.
///
/// An empty ring has no bounding box and is rejected with
/// [`PlotError::EmptyRing`].
pub fn bounding_box(coords: &[LatLng]) -> Result<BoundingBox> {
    let (first, rest) = coords.split_first().ok_or(PlotError::EmptyRing)?;

    Ok(rest.iter().fold(BoundingBox::from(*first), |mut bbox, point| {
        bbox.expand(*point);
        bbox
    }))
}
