use crate::models::BoundingBox;
use geo::{Area, Polygon, Relate};
use wkt::TryFromWkt;

/// Parse stored WKT strictly into a `geo` polygon.
///
/// Unlike the display codec this rejects the whole string on any error.
pub fn parse_polygon_strict(wkt: &str) -> Option<Polygon<f64>> {
    let wkt = wkt.trim();
    if wkt.is_empty() {
        return None;
    }
    Polygon::<f64>::try_from_wkt_str(wkt).ok()
}

/// Check whether two stored polygons overlap.
///
/// Only a shared interior counts: polygons that merely touch along an edge
/// or at a corner do not overlap. Unparseable input never overlaps.
pub fn polygons_overlap(wkt_a: &str, wkt_b: &str) -> bool {
    let (Some(a), Some(b)) = (parse_polygon_strict(wkt_a), parse_polygon_strict(wkt_b)) else {
        return false;
    };
    interiors_intersect(&a, &b)
}

/// Interior-intersection test on parsed polygons.
///
/// A ring with no area has no interior and overlaps nothing.
pub fn interiors_intersect(a: &Polygon<f64>, b: &Polygon<f64>) -> bool {
    if a.unsigned_area() <= 0.0 || b.unsigned_area() <= 0.0 {
        return false;
    }
    let matrix = a.relate(b);
    matrix.is_intersects() && !matrix.is_touches()
}

/// Check if two bounding boxes intersect (boundaries included)
pub fn bboxes_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_A: &str = "POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))";
    const SQUARE_B: &str = "POLYGON((0.5 0.5, 1.5 0.5, 1.5 1.5, 0.5 1.5, 0.5 0.5))";
    const SQUARE_FAR: &str = "POLYGON((10 10, 11 10, 11 11, 10 11, 10 10))";
    const EDGE_TOUCH: &str = "POLYGON((1 0, 2 0, 2 1, 1 1, 1 0))";
    const CORNER_TOUCH: &str = "POLYGON((1 1, 2 1, 2 2, 1 2, 1 1))";
    const CONTAINED: &str = "POLYGON((0.2 0.2, 0.8 0.2, 0.8 0.8, 0.2 0.8, 0.2 0.2))";

    #[test]
    fn test_overlapping_squares() {
        assert!(polygons_overlap(SQUARE_A, SQUARE_B));
        assert!(polygons_overlap(SQUARE_B, SQUARE_A));
    }

    #[test]
    fn test_non_overlapping_squares() {
        assert!(!polygons_overlap(SQUARE_A, SQUARE_FAR));
    }

    #[test]
    fn test_edge_touching_only() {
        assert!(!polygons_overlap(SQUARE_A, EDGE_TOUCH));
    }

    #[test]
    fn test_corner_touching_only() {
        assert!(!polygons_overlap(SQUARE_A, CORNER_TOUCH));
    }

    #[test]
    fn test_contained_polygon() {
        assert!(polygons_overlap(SQUARE_A, CONTAINED));
        assert!(polygons_overlap(CONTAINED, SQUARE_A));
    }

    #[test]
    fn test_invalid_wkt() {
        assert!(!polygons_overlap("not valid", SQUARE_A));
        assert!(!polygons_overlap(SQUARE_A, "POLYGON((0 0, x y, 1 1, 0 0))"));
    }

    #[test]
    fn test_degenerate_rings_never_overlap() {
        assert!(!polygons_overlap(SQUARE_A, "POLYGON((0 0, 1 0, 0 0))"));
        assert!(!polygons_overlap(SQUARE_A, "POLYGON((0.5 0.5, 0.5 0.5, 0.5 0.5, 0.5 0.5))"));
        assert!(!polygons_overlap("POLYGON((0.2 0.2, 0.8 0.8, 0.2 0.2))", SQUARE_A));
    }

    #[test]
    fn test_empty_string() {
        assert!(!polygons_overlap("", SQUARE_A));
        assert!(parse_polygon_strict("   ").is_none());
    }

    #[test]
    fn test_strict_parse_is_lon_lat() {
        let polygon = parse_polygon_strict("POLYGON((38.7 9, 38.8 9, 38.8 9.1, 38.7 9))").unwrap();
        assert_eq!(polygon.exterior().0[0].x, 38.7);
        assert_eq!(polygon.exterior().0[0].y, 9.0);
    }

    #[test]
    fn test_bboxes_intersect() {
        let a = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        let b = BoundingBox::new(0.5, 1.5, 0.5, 1.5);
        let far = BoundingBox::new(10.0, 11.0, 10.0, 11.0);
        assert!(bboxes_intersect(&a, &b));
        assert!(!bboxes_intersect(&a, &far));
    }
}
