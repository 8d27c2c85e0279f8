use crate::models::{closed_ring, ring_to_polygon, LatLng};
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, Line};
use plotreview_core::config::ValidationRules;

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE_AT_EQUATOR: f64 = 111_320.0;

/// Validation result with details
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// The message stored as a plot's flag reason
    pub fn first_reason(&self) -> Option<&str> {
        self.errors.first().map(|e| e.reason.as_str())
    }
}

/// Validate a plot boundary.
///
/// Checks run in order and stop at the first failure: vertex count, simple
/// ring (no self-intersections), minimum area.
pub fn validate_polygon(coords: &[LatLng], rules: &ValidationRules) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if coords.len() < rules.min_vertices {
        result.add_error(
            "Polygon exterior".to_string(),
            "Polygon has too few vertices. Minimum 3 distinct points required.".to_string(),
        );
        return result;
    }

    if let Some(location) = find_self_intersection(coords) {
        result.add_error(location, "Polygon lines intersect or cross each other.".to_string());
        return result;
    }

    let area = area_sq_meters(coords);
    if area < rules.min_area_sq_meters {
        result.add_error(
            format!("Polygon area ({:.2} m²)", area),
            format!(
                "Polygon area is too small. Minimum {:.0} square meters required.",
                rules.min_area_sq_meters
            ),
        );
    }

    result
}

/// Approximate area in square meters.
///
/// Planar area in squared degrees, scaled with an equirectangular
/// approximation at the mean latitude of the ring's vertices.
pub fn area_sq_meters(coords: &[LatLng]) -> f64 {
    if coords.is_empty() {
        return 0.0;
    }

    let area_deg = ring_to_polygon(coords).unsigned_area();
    let centroid_lat = coords.iter().map(|p| p.lat).sum::<f64>() / coords.len() as f64;

    let m_per_deg_lat = METERS_PER_DEGREE_AT_EQUATOR;
    let m_per_deg_lon = METERS_PER_DEGREE_AT_EQUATOR * centroid_lat.to_radians().cos();
    area_deg * m_per_deg_lat * m_per_deg_lon
}

/// Location of the first pair of edges that cross or overlap, if any.
///
/// Also reports rings with fewer than three distinct vertices, which cannot
/// bound an area.
fn find_self_intersection(coords: &[LatLng]) -> Option<String> {
    let mut ring = closed_ring(coords);
    ring.dedup();

    let edges: Vec<Line<f64>> =
        ring.windows(2).map(|w| Line::new(w[0].to_coord(), w[1].to_coord())).collect();

    if edges.len() < 3 {
        return Some(format!("Polygon exterior ({} distinct vertices)", edges.len()));
    }

    let last = edges.len() - 1;
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let adjacent = j == i + 1 || (i == 0 && j == last);
            match line_intersection(edges[i], edges[j]) {
                None => {}
                // Neighbouring edges share exactly one vertex.
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(_) => return Some(format!("Polygon edges [{}] and [{}]", i, j)),
            }
        }
    }

    None
}
