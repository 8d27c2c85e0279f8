//! Error types for plotreview

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    // Geometry errors
    #[error("Cannot compute a bounding box for an empty coordinate ring")]
    EmptyRing,

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, PlotError>;
