//! Plot extraction from raw form submissions.
//!
//! Field lists come from the form's [`FieldMapping`]. Extraction never fails:
//! a plot is always produced so that reviewers can fix its boundary on the
//! map, and problems with the polygon are recorded as a review flag.

use crate::{NO_POLYGON_REASON, PARSE_FAILED_REASON};
use plotreview_core::models::{BoundingBox, FieldMapping, Plot};
use plotreview_core::ValidationRules;
use plotreview_geo::{bounding_box, parse_odk_geoshape, to_wkt_polygon, validate_polygon};
use serde::Serialize;
use serde_json::{Map, Value};

/// Plot name used when none of the name fields carry a value
pub const UNKNOWN_PLOT_NAME: &str = "Unknown";

const JOINED_SEPARATOR: &str = " - ";

/// Plot attributes derived from one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotData {
    pub plot_name: String,
    pub region: String,
    pub sub_region: String,
    pub polygon_wkt: Option<String>,
    pub polygon_source_field: Option<String>,
    pub bbox: Option<BoundingBox>,
    pub flagged_for_review: Option<bool>,
    pub flagged_reason: Option<String>,
}

impl PlotData {
    fn flagged(mut self, reason: &str) -> Self {
        self.flagged_for_review = Some(true);
        self.flagged_reason = Some(reason.to_string());
        self
    }

    /// Overwrite a plot's derived fields, e.g. after the field mapping changed
    pub fn apply_to(self, plot: &mut Plot) {
        plot.plot_name = self.plot_name;
        plot.region = self.region;
        plot.sub_region = self.sub_region;
        plot.polygon_wkt = self.polygon_wkt;
        plot.polygon_source_field = self.polygon_source_field;
        plot.set_bbox(self.bbox);
        plot.flagged_for_review = self.flagged_for_review;
        plot.flagged_reason = self.flagged_reason;
    }

    /// Build a new plot for a submission
    pub fn into_plot(self, uuid: impl Into<String>, form_id: impl Into<String>) -> Plot {
        let mut plot = Plot::new(uuid, form_id);
        self.apply_to(&mut plot);
        plot
    }
}

/// Derive plot attributes from a submission's raw fields.
pub fn extract_plot_data(
    raw: &Map<String, Value>,
    mapping: &FieldMapping,
    rules: &ValidationRules,
) -> PlotData {
    let data = PlotData {
        plot_name: build_plot_name(raw, &mapping.plot_name_fields()),
        region: join_values(raw, &mapping.region_fields(), JOINED_SEPARATOR),
        sub_region: join_values(raw, &mapping.sub_region_fields(), JOINED_SEPARATOR),
        polygon_wkt: None,
        polygon_source_field: None,
        bbox: None,
        flagged_for_review: None,
        flagged_reason: None,
    };

    let polygon_fields = mapping.polygon_fields();
    if polygon_fields.is_empty() {
        return data;
    }

    let Some((field, geoshape)) = first_non_empty(raw, &polygon_fields) else {
        tracing::warn!(fields = ?polygon_fields, "No polygon data found in submission fields");
        return data.flagged(NO_POLYGON_REASON);
    };
    let data = PlotData { polygon_source_field: Some(field.to_string()), ..data };

    let Some(coords) = parse_odk_geoshape(&geoshape) else {
        tracing::warn!(field, "Failed to parse polygon from submission field");
        return data.flagged(PARSE_FAILED_REASON);
    };

    let validation = validate_polygon(&coords, rules);
    if let Some(reason) = validation.first_reason() {
        tracing::warn!(field, reason, "Invalid polygon in submission");
        return data.flagged(reason);
    }

    PlotData {
        polygon_wkt: Some(to_wkt_polygon(&coords)),
        bbox: bounding_box(&coords).ok(),
        flagged_for_review: Some(false),
        ..data
    }
}

/// Text of a submission value.
///
/// Strings are trimmed and numbers are written out; null, booleans and
/// nested values carry no usable text.
fn field_text(raw: &Map<String, Value>, field: &str) -> Option<String> {
    let text = match raw.get(field)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn first_non_empty<'a>(raw: &Map<String, Value>, fields: &'a [String]) -> Option<(&'a str, String)> {
    fields.iter().find_map(|field| field_text(raw, field).map(|text| (field.as_str(), text)))
}

fn join_values(raw: &Map<String, Value>, fields: &[String], separator: &str) -> String {
    fields.iter().filter_map(|field| field_text(raw, field)).collect::<Vec<_>>().join(separator)
}

fn build_plot_name(raw: &Map<String, Value>, fields: &[String]) -> String {
    let name = join_values(raw, fields, " ");
    if name.is_empty() {
        UNKNOWN_PLOT_NAME.to_string()
    } else {
        name
    }
}
