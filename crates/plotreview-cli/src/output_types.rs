use plotreview_core::config::ConfigSource;
use plotreview_core::models::{BoundingBox, LatLng, PlotStatus};
use plotreview_curation::RevalidateOutcome;
use plotreview_geo::ValidationError;
use serde::Serialize;
use tabled::Tabled;

/// Output for parse command
#[derive(Debug, Serialize)]
pub struct ParseOutput {
    pub coords: Vec<LatLng>,
    pub vertex_count: usize,
    pub dropped: usize,
}

/// Output for serialize and geoshape to-wkt commands
#[derive(Debug, Serialize)]
pub struct WktOutput {
    pub wkt: String,
}

/// Output for geoshape from-wkt command
#[derive(Debug, Serialize)]
pub struct GeoshapeOutput {
    pub geoshape: String,
}

/// Output for bbox command
#[derive(Debug, Serialize)]
pub struct BboxOutput {
    pub bbox: BoundingBox,
}

/// Output for validate command
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub is_valid: bool,
    pub vertex_count: usize,
    pub dropped: usize,
    pub area_sq_meters: f64,
    pub errors: Vec<ValidationError>,
}

/// Output for overlaps command
#[derive(Debug, Serialize)]
pub struct OverlapsOutput {
    pub checked: usize,
    pub overlapping: usize,
    pub plots: Vec<PlotFlagRow>,
}

/// One plot's review state after the overlap check
#[derive(Debug, Serialize, Tabled)]
pub struct PlotFlagRow {
    #[tabled(rename = "UUID")]
    pub uuid: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: PlotStatus,
    #[tabled(rename = "Geometry", display_with = "display_outcome")]
    pub geometry: Option<RevalidateOutcome>,
    #[tabled(rename = "Flagged")]
    pub flagged: bool,
    #[tabled(rename = "Reason", display_with = "display_reason")]
    pub reason: Option<String>,
}

fn display_outcome(outcome: &Option<RevalidateOutcome>) -> String {
    match outcome {
        None => "-".to_string(),
        Some(RevalidateOutcome::Valid) => "valid".to_string(),
        Some(RevalidateOutcome::MissingGeometry) => "missing".to_string(),
        Some(RevalidateOutcome::Unparseable) => "unparseable".to_string(),
        Some(RevalidateOutcome::Invalid { .. }) => "invalid".to_string(),
    }
}

fn display_reason(reason: &Option<String>) -> String {
    reason.clone().unwrap_or_default()
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub min_area_sq_meters: ConfigEntry,
    pub min_vertices: ConfigEntry,
    pub max_reason_len: ConfigEntry,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: ConfigSource,
}
