//! Plotreview Curation - Review workflow over extracted plots
//!
//! This crate turns raw form submissions into plots, re-validates edited
//! boundaries, and flags plots whose boundaries overlap.

pub mod extract;
pub mod overlap;
pub mod revalidate;

pub use extract::{extract_plot_data, PlotData};
pub use overlap::{
    append_overlap_reason, build_overlap_reason, find_overlaps, flag_all_overlaps,
    flag_overlaps, has_validation_flag, is_overlap_candidate, OverlapRef,
};
pub use revalidate::{commit_edit, revalidate_and_check, revalidate_plot, RevalidateOutcome};

/// Flag reason for a plot whose submission carries no polygon
pub const NO_POLYGON_REASON: &str = "No polygon data found in submission.";

/// Flag reason for polygon text that cannot be parsed
pub const PARSE_FAILED_REASON: &str = "Failed to parse polygon geometry.";
