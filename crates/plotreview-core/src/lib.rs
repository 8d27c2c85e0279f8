//! plotreview Core - Domain models, errors, and configuration
//!
//! This crate holds the types shared by the geometry codec, the curation
//! workflow, and the command-line tool.

pub mod config;
pub mod error;
pub mod models;

pub use config::ValidationRules;
pub use error::{PlotError, Result};
