use crate::overlap::{flag_overlaps, has_validation_flag};
use crate::{NO_POLYGON_REASON, PARSE_FAILED_REASON};
use plotreview_core::models::{LatLng, Plot};
use plotreview_core::ValidationRules;
use plotreview_geo::{bounding_box, parse_wkt_polygon, to_wkt_polygon, validate_polygon};
use serde::Serialize;

/// What re-validating a plot's stored boundary found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RevalidateOutcome {
    /// No WKT stored; flagged and bbox cleared
    MissingGeometry,
    /// WKT present but no vertex could be read; flagged
    Unparseable,
    /// Boundary failed validation; flagged with the validation message
    Invalid { reason: String },
    /// Boundary passed; bbox recomputed, a stale validation flag cleared and
    /// overlap flags left for the overlap check
    Valid,
}

impl RevalidateOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Re-validate a plot after its boundary was edited.
pub fn revalidate_plot(plot: &mut Plot, rules: &ValidationRules) -> RevalidateOutcome {
    let Some(wkt) = plot.polygon_wkt.as_deref().filter(|wkt| !wkt.trim().is_empty()) else {
        plot.flag(NO_POLYGON_REASON);
        plot.set_bbox(None);
        return RevalidateOutcome::MissingGeometry;
    };

    let coords = parse_wkt_polygon(wkt);
    let Ok(bbox) = bounding_box(&coords) else {
        plot.flag(PARSE_FAILED_REASON);
        return RevalidateOutcome::Unparseable;
    };

    let validation = validate_polygon(&coords, rules);
    if let Some(reason) = validation.first_reason() {
        let reason = reason.to_string();
        plot.flag(reason.clone());
        return RevalidateOutcome::Invalid { reason };
    }

    plot.set_bbox(Some(bbox));
    if has_validation_flag(plot) {
        plot.clear_flag();
    }
    RevalidateOutcome::Valid
}

/// Store an edited ring on a plot and re-validate it.
///
/// An empty ring clears the geometry instead of storing an empty string.
pub fn commit_edit(plot: &mut Plot, coords: &[LatLng], rules: &ValidationRules) -> RevalidateOutcome {
    plot.polygon_wkt = (!coords.is_empty()).then(|| to_wkt_polygon(coords));
    revalidate_plot(plot, rules)
}

/// Re-validate one plot and, when its boundary is valid, run the overlap check.
pub fn revalidate_and_check(
    plots: &mut [Plot],
    target: usize,
    rules: &ValidationRules,
) -> Option<RevalidateOutcome> {
    let outcome = revalidate_plot(plots.get_mut(target)?, rules);
    if outcome.is_valid() {
        flag_overlaps(plots, target, rules);
    }
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "POLYGON((0 0, 0.001 0, 0.001 0.001, 0 0.001, 0 0))";

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    #[test]
    fn test_missing_geometry() {
        let mut plot = Plot::new("p1", "f1");
        plot.min_lat = Some(1.0);

        assert_eq!(revalidate_plot(&mut plot, &rules()), RevalidateOutcome::MissingGeometry);
        assert!(plot.is_flagged());
        assert_eq!(plot.flagged_reason.as_deref(), Some(NO_POLYGON_REASON));
        assert!(plot.min_lat.is_none());
    }

    #[test]
    fn test_unparseable_geometry() {
        let mut plot = Plot::new("p1", "f1").with_wkt("LINESTRING(0 0, 1 1)");
        assert_eq!(revalidate_plot(&mut plot, &rules()), RevalidateOutcome::Unparseable);
        assert_eq!(plot.flagged_reason.as_deref(), Some(PARSE_FAILED_REASON));
    }

    #[test]
    fn test_invalid_geometry() {
        let mut plot =
            Plot::new("p1", "f1").with_wkt("POLYGON((0 0, 0.001 0.001, 0.001 0, 0 0.001, 0 0))");
        let outcome = revalidate_plot(&mut plot, &rules());
        assert!(matches!(outcome, RevalidateOutcome::Invalid { ref reason } if reason.contains("intersect")));
        assert!(plot.is_flagged());
        assert!(plot.bbox().is_none());
    }

    #[test]
    fn test_valid_geometry_sets_bbox() {
        let mut plot = Plot::new("p1", "f1").with_wkt(SQUARE);
        assert_eq!(revalidate_plot(&mut plot, &rules()), RevalidateOutcome::Valid);

        let bbox = plot.bbox().unwrap();
        assert_eq!((bbox.min_lat, bbox.max_lat), (0.0, 0.001));
        assert_eq!((bbox.min_lon, bbox.max_lon), (0.0, 0.001));
        assert!(!plot.is_flagged());
    }

    #[test]
    fn test_valid_geometry_clears_stale_validation_flag() {
        let mut plot = Plot::new("p1", "f1").with_wkt(SQUARE);
        plot.flag("Polygon area is too small. Minimum 10 square meters required.");
        assert!(revalidate_plot(&mut plot, &rules()).is_valid());
        assert!(!plot.is_flagged());

        plot.flag("Polygon overlaps with: Abebe (inst1)");
        assert!(revalidate_plot(&mut plot, &rules()).is_valid());
        assert_eq!(plot.flagged_reason.as_deref(), Some("Polygon overlaps with: Abebe (inst1)"));
    }

    #[test]
    fn test_commit_empty_ring_clears_geometry() {
        let mut plot = Plot::new("p1", "f1").with_wkt(SQUARE);
        assert_eq!(commit_edit(&mut plot, &[], &rules()), RevalidateOutcome::MissingGeometry);
        assert!(plot.polygon_wkt.is_none());
    }

    #[test]
    fn test_commit_edit_serializes_ring() {
        let mut plot = Plot::new("p1", "f1");
        let ring = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.001),
            LatLng::new(0.001, 0.001),
            LatLng::new(0.001, 0.0),
            LatLng::new(0.0, 0.0),
        ];
        assert!(commit_edit(&mut plot, &ring, &rules()).is_valid());
        assert_eq!(plot.polygon_wkt.as_deref(), Some(SQUARE));
    }

    #[test]
    fn test_revalidate_and_check_out_of_range() {
        assert!(revalidate_and_check(&mut [], 0, &rules()).is_none());
    }
}
