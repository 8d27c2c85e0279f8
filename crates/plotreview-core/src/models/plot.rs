use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::BoundingBox;

/// Review decision stored by the backend as an integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "i64", into = "i64")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Map a backend code; anything unknown is still awaiting review.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ApprovalStatus::Approved,
            2 => ApprovalStatus::Rejected,
            _ => ApprovalStatus::Pending,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ApprovalStatus::Pending => 0,
            ApprovalStatus::Approved => 1,
            ApprovalStatus::Rejected => 2,
        }
    }
}

impl From<i64> for ApprovalStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl From<ApprovalStatus> for i64 {
    fn from(status: ApprovalStatus) -> Self {
        status.code()
    }
}

/// Display status of a plot on the review map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlotStatus::Pending => "pending",
            PlotStatus::Approved => "approved",
            PlotStatus::Rejected => "rejected",
        };
        write!(f, "{}", name)
    }
}

impl From<ApprovalStatus> for PlotStatus {
    fn from(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Pending => PlotStatus::Pending,
            ApprovalStatus::Approved => PlotStatus::Approved,
            ApprovalStatus::Rejected => PlotStatus::Rejected,
        }
    }
}

/// A surveyed plot as exchanged with the backend.
///
/// The bounding box is stored as four nullable columns, mirrored here as
/// four optional fields; use [`Plot::bbox`] to read them as one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub uuid: String,

    #[serde(default)]
    pub form_id: String,

    #[serde(default)]
    pub plot_name: String,

    #[serde(default)]
    pub instance_name: String,

    #[serde(default)]
    pub polygon_wkt: Option<String>,

    /// Submission field the polygon was read from
    #[serde(default)]
    pub polygon_source_field: Option<String>,

    #[serde(default)]
    pub min_lat: Option<f64>,
    #[serde(default)]
    pub max_lat: Option<f64>,
    #[serde(default)]
    pub min_lon: Option<f64>,
    #[serde(default)]
    pub max_lon: Option<f64>,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub sub_region: String,

    #[serde(default)]
    pub approval_status: ApprovalStatus,

    #[serde(default)]
    pub flagged_for_review: Option<bool>,

    #[serde(default)]
    pub flagged_reason: Option<String>,
}

impl Plot {
    pub fn new(uuid: impl Into<String>, form_id: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            form_id: form_id.into(),
            plot_name: String::new(),
            instance_name: String::new(),
            polygon_wkt: None,
            polygon_source_field: None,
            min_lat: None,
            max_lat: None,
            min_lon: None,
            max_lon: None,
            region: String::new(),
            sub_region: String::new(),
            approval_status: ApprovalStatus::Pending,
            flagged_for_review: None,
            flagged_reason: None,
        }
    }

    pub fn with_name(mut self, plot_name: impl Into<String>) -> Self {
        self.plot_name = plot_name.into();
        self
    }

    pub fn with_instance(mut self, instance_name: impl Into<String>) -> Self {
        self.instance_name = instance_name.into();
        self
    }

    pub fn with_wkt(mut self, wkt: impl Into<String>) -> Self {
        self.polygon_wkt = Some(wkt.into());
        self
    }

    pub fn status(&self) -> PlotStatus {
        self.approval_status.into()
    }

    /// True when a non-empty WKT string is stored
    pub fn has_geometry(&self) -> bool {
        self.polygon_wkt.as_deref().is_some_and(|wkt| !wkt.trim().is_empty())
    }

    /// The stored bounding box, if all four columns are set
    pub fn bbox(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(self.min_lat?, self.max_lat?, self.min_lon?, self.max_lon?))
    }

    pub fn set_bbox(&mut self, bbox: Option<BoundingBox>) {
        self.min_lat = bbox.map(|b| b.min_lat);
        self.max_lat = bbox.map(|b| b.max_lat);
        self.min_lon = bbox.map(|b| b.min_lon);
        self.max_lon = bbox.map(|b| b.max_lon);
    }

    pub fn flag(&mut self, reason: impl Into<String>) {
        self.flagged_for_review = Some(true);
        self.flagged_reason = Some(reason.into());
    }

    pub fn clear_flag(&mut self) {
        self.flagged_for_review = Some(false);
        self.flagged_reason = None;
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged_for_review.unwrap_or(false)
    }

    /// Instance label, falling back to the plot uuid
    pub fn instance_label(&self) -> &str {
        if self.instance_name.is_empty() {
            &self.uuid
        } else {
            &self.instance_name
        }
    }

    /// Plot name, falling back to the instance label
    pub fn display_name(&self) -> &str {
        if self.plot_name.is_empty() {
            self.instance_label()
        } else {
            &self.plot_name
        }
    }
}
