use plotreview_core::models::{BoundingBox, Plot};
use plotreview_core::ValidationRules;
use plotreview_geo::{bounding_box, parse_wkt_polygon, polygons_overlap, OverlapIndex};
use serde::Serialize;
use std::fmt;

const OVERLAP_PREFIX: &str = "Polygon overlaps with: ";
const ELLIPSIS: &str = "...";

/// A plot named in an overlap reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapRef {
    pub plot_name: String,
    pub instance_name: String,
}

impl OverlapRef {
    pub fn new(plot_name: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self { plot_name: plot_name.into(), instance_name: instance_name.into() }
    }
}

impl From<&Plot> for OverlapRef {
    fn from(plot: &Plot) -> Self {
        Self::new(plot.display_name(), plot.instance_label())
    }
}

impl fmt::Display for OverlapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.plot_name, self.instance_name)
    }
}

/// Reason text listing every overlapping plot, e.g.
/// `"Polygon overlaps with: Abebe (inst1), Kebede (inst2)"`.
pub fn build_overlap_reason(overlaps: &[OverlapRef], max_len: usize) -> String {
    let names = overlaps.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    truncate_reason(format!("{}{}", OVERLAP_PREFIX, names), max_len)
}

/// Add one overlapping plot to an existing flag reason.
///
/// A reason that already names the plot is returned unchanged.
pub fn append_overlap_reason(
    existing: Option<&str>,
    plot_name: &str,
    instance_name: &str,
    max_len: usize,
) -> String {
    let entry = OverlapRef::new(plot_name, instance_name).to_string();

    match existing.filter(|reason| !reason.is_empty()) {
        None => truncate_reason(format!("{}{}", OVERLAP_PREFIX, entry), max_len),
        Some(reason) if reason.contains(&entry) => reason.to_string(),
        Some(reason) => {
            truncate_reason(format!("{}; {}{}", reason, OVERLAP_PREFIX, entry), max_len)
        }
    }
}

/// Cut a reason to `max_len` characters, ending in `"..."` when shortened
fn truncate_reason(reason: String, max_len: usize) -> String {
    if reason.chars().count() <= max_len {
        return reason;
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = reason.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Stored WKT and bounding box of a plot, when it has geometry.
///
/// Plots saved without bbox columns fall back to the box of the parsed ring.
fn geometry_of(plot: &Plot) -> Option<(&str, BoundingBox)> {
    let wkt = plot.polygon_wkt.as_deref().filter(|wkt| !wkt.trim().is_empty())?;
    let bbox = plot.bbox().or_else(|| bounding_box(&parse_wkt_polygon(wkt)).ok())?;
    Some((wkt, bbox))
}

/// Whether the plot carries a flag other than an overlap reason, such as a
/// failed validation or a missing polygon
pub fn has_validation_flag(plot: &Plot) -> bool {
    plot.flagged_reason
        .as_deref()
        .is_some_and(|reason| !reason.is_empty() && !reason.starts_with(OVERLAP_PREFIX))
}

/// Whether the plot takes part in overlap checks.
///
/// A boundary that failed validation keeps its flag and is neither checked
/// nor matched against other plots.
pub fn is_overlap_candidate(plot: &Plot) -> bool {
    plot.has_geometry() && !has_validation_flag(plot)
}

/// Positions in `plots` of same-form plots whose boundary overlaps `plot`
fn overlapping_positions(plot: &Plot, plots: &[Plot]) -> Vec<usize> {
    let Some((wkt, bbox)) = geometry_of(plot) else {
        return Vec::new();
    };

    let index = OverlapIndex::from_entries(
        plots
            .iter()
            .enumerate()
            .filter(|(_, other)| other.form_id == plot.form_id && other.uuid != plot.uuid)
            .filter(|(_, other)| !has_validation_flag(other))
            .filter_map(|(pos, other)| geometry_of(other).map(|(_, other_bbox)| (pos, other_bbox))),
    );

    let mut found: Vec<usize> = index
        .candidates(&bbox, None)
        .into_iter()
        .copied()
        .filter(|&pos| {
            geometry_of(&plots[pos]).is_some_and(|(other_wkt, _)| polygons_overlap(wkt, other_wkt))
        })
        .collect();

    found.sort_unstable();
    found
}

/// Plots of the same form whose boundary shares interior area with `plot`.
///
/// The plot itself (matched by uuid), plots without geometry and plots
/// flagged for a failed validation are never returned. Results keep the order of `plots`.
pub fn find_overlaps<'a>(plot: &Plot, plots: &'a [Plot]) -> Vec<&'a Plot> {
    overlapping_positions(plot, plots).into_iter().map(|pos| &plots[pos]).collect()
}

/// Check one plot for overlaps and update flags on both sides.
///
/// When overlaps exist the plot is flagged with a reason listing them and
/// each overlapping plot gets this plot appended to its own reason. With no
/// overlap the plot's flag is cleared. Plots that are not
/// [overlap candidates](is_overlap_candidate) are left untouched. Returns
/// whether any overlap was found.
pub fn flag_overlaps(plots: &mut [Plot], target: usize, rules: &ValidationRules) -> bool {
    let Some(plot) = plots.get(target) else {
        return false;
    };
    if !is_overlap_candidate(plot) {
        return false;
    }

    let positions = overlapping_positions(plot, plots);
    if positions.is_empty() {
        plots[target].clear_flag();
        return false;
    }

    let refs: Vec<OverlapRef> = positions.iter().map(|&pos| OverlapRef::from(&plots[pos])).collect();
    let name = plots[target].display_name().to_string();
    let instance = plots[target].instance_label().to_string();

    tracing::info!(plot = %instance, overlaps = refs.len(), "Plot overlaps existing plots");
    plots[target].flag(build_overlap_reason(&refs, rules.max_reason_len));

    for pos in positions {
        let other = &mut plots[pos];
        let reason = append_overlap_reason(
            other.flagged_reason.as_deref(),
            &name,
            &instance,
            rules.max_reason_len,
        );
        other.flag(reason);
    }

    true
}

/// Run [`flag_overlaps`] for every overlap candidate, in order.
///
/// Returns the number of plots found to overlap another plot.
pub fn flag_all_overlaps(plots: &mut [Plot], rules: &ValidationRules) -> usize {
    let mut flagged = 0;
    for target in 0..plots.len() {
        if is_overlap_candidate(&plots[target]) && flag_overlaps(plots, target, rules) {
            flagged += 1;
        }
    }

    tracing::debug!(plots = plots.len(), flagged, "Overlap check finished");
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 500;

    #[test]
    fn test_single_overlap() {
        let reason = build_overlap_reason(&[OverlapRef::new("Abebe", "inst1")], MAX);
        assert_eq!(reason, "Polygon overlaps with: Abebe (inst1)");
    }

    #[test]
    fn test_multiple_overlaps() {
        let reason = build_overlap_reason(
            &[OverlapRef::new("Abebe", "inst1"), OverlapRef::new("Kebede", "inst2")],
            MAX,
        );
        assert_eq!(reason, "Polygon overlaps with: Abebe (inst1), Kebede (inst2)");
    }

    #[test]
    fn test_truncation() {
        let many: Vec<OverlapRef> = (0..100)
            .map(|i| OverlapRef::new(format!("Farmer{}", i), format!("instance{}", i)))
            .collect();
        let reason = build_overlap_reason(&many, MAX);
        assert_eq!(reason.chars().count(), MAX);
        assert!(reason.ends_with("..."));
    }

    #[test]
    fn test_append_to_none() {
        assert_eq!(
            append_overlap_reason(None, "Abebe", "inst1", MAX),
            "Polygon overlaps with: Abebe (inst1)"
        );
        assert_eq!(
            append_overlap_reason(Some(""), "Abebe", "inst1", MAX),
            "Polygon overlaps with: Abebe (inst1)"
        );
    }

    #[test]
    fn test_append_to_existing() {
        let existing = "Polygon overlaps with: Kebede (inst2)";
        let result = append_overlap_reason(Some(existing), "Abebe", "inst1", MAX);
        assert_eq!(
            result,
            "Polygon overlaps with: Kebede (inst2); Polygon overlaps with: Abebe (inst1)"
        );
    }

    #[test]
    fn test_duplicate_prevention() {
        let existing = "Polygon overlaps with: Abebe (inst1)";
        assert_eq!(append_overlap_reason(Some(existing), "Abebe", "inst1", MAX), existing);
    }

    #[test]
    fn test_truncation_on_append() {
        let existing = "x".repeat(495);
        let result = append_overlap_reason(Some(&existing), "Abebe", "inst1", MAX);
        assert!(result.chars().count() <= MAX);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let reason = truncate_reason("Ābēbē Ābēbē".to_string(), 8);
        assert_eq!(reason, "Ābēbē...");
    }

    #[test]
    fn test_validation_flag_detection() {
        let mut plot = Plot::new("uuid-1", "form").with_wkt("POLYGON((0 0, 1 0, 1 1, 0 0))");
        assert!(is_overlap_candidate(&plot));

        plot.flag("Polygon overlaps with: Abebe (inst1)");
        assert!(!has_validation_flag(&plot));
        assert!(is_overlap_candidate(&plot));

        plot.flag("Polygon area is too small. Minimum 10 square meters required.");
        assert!(has_validation_flag(&plot));
        assert!(!is_overlap_candidate(&plot));
    }

    #[test]
    fn test_overlap_ref_from_plot_falls_back_to_uuid() {
        let plot = Plot::new("uuid-1", "form");
        assert_eq!(OverlapRef::from(&plot).to_string(), "uuid-1 (uuid-1)");
    }
}
