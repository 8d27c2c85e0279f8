use clap::{Args, Parser, Subcommand};
use plotreview_core::config::{parse_min_area, parse_min_vertices, parse_reason_len};
use std::path::PathBuf;

/// Plotreview - Plot boundary codec and review tools
#[derive(Parser, Debug)]
#[command(name = "plotreview")]
#[command(about = "Plot boundary codec, validation and overlap review", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./plotreview.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum plot area in square meters
    #[arg(long, global = true, value_name = "M2", value_parser = parse_min_area)]
    pub min_area: Option<f64>,

    /// Minimum number of ring vertices, closing point included
    #[arg(long, global = true, value_name = "N", value_parser = parse_min_vertices)]
    pub min_vertices: Option<usize>,

    /// Maximum length of a stored flag reason
    #[arg(long, global = true, value_name = "CHARS", value_parser = parse_reason_len)]
    pub max_reason_len: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a WKT polygon into [lat, lon] pairs
    Parse(WktArgs),

    /// Serialize [[lat, lon], ...] JSON into a WKT polygon
    Serialize(SerializeArgs),

    /// Compute the bounding box of a WKT polygon
    Bbox(WktArgs),

    /// Validate a WKT polygon against the configured rules
    Validate(WktArgs),

    /// Convert between ODK geoshape and WKT
    Geoshape(GeoshapeArgs),

    /// Extract plot data from a form submission
    Extract(ExtractArgs),

    /// Check a set of plots for overlapping boundaries
    Overlaps(OverlapsArgs),

    /// Show the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct WktArgs {
    /// WKT text, e.g. "POLYGON((38.7 9.0, 38.8 9.0, 38.8 9.1, 38.7 9.0))"
    pub wkt: String,
}

#[derive(Args, Debug)]
pub struct SerializeArgs {
    /// JSON array of [lat, lon] pairs
    pub coords: String,
}

#[derive(Args, Debug)]
pub struct GeoshapeArgs {
    #[command(subcommand)]
    pub command: GeoshapeCommand,
}

#[derive(Subcommand, Debug)]
pub enum GeoshapeCommand {
    /// Convert an ODK geoshape ("lat lon alt acc; ...") to WKT
    ToWkt {
        /// Geoshape text
        geoshape: String,
    },

    /// Convert a WKT polygon to an ODK geoshape
    FromWkt {
        /// WKT text
        wkt: String,
    },
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// JSON file holding one submission object
    #[arg(long, value_name = "FILE")]
    pub submission: PathBuf,

    /// Comma-separated polygon fields, first non-empty wins
    #[arg(long, value_name = "FIELDS")]
    pub polygon_field: Option<String>,

    /// Comma-separated region fields
    #[arg(long, value_name = "FIELDS")]
    pub region_field: Option<String>,

    /// Comma-separated sub-region fields
    #[arg(long, value_name = "FIELDS")]
    pub sub_region_field: Option<String>,

    /// Comma-separated plot name fields
    #[arg(long, value_name = "FIELDS")]
    pub plot_name_field: Option<String>,
}

#[derive(Args, Debug)]
pub struct OverlapsArgs {
    /// JSON file holding an array of plots
    pub plots: PathBuf,

    /// Re-validate every boundary before checking overlaps
    #[arg(long)]
    pub revalidate: bool,

    /// Write the updated plots to this file
    #[arg(long, value_name = "FILE")]
    pub write: Option<PathBuf>,
}
