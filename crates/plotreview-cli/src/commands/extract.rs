//! Extract command implementation

use crate::cli::ExtractArgs;
use crate::errors;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use plotreview_core::models::FieldMapping;
use plotreview_core::ValidationRules;
use plotreview_curation::extract_plot_data;
use serde_json::{Map, Value};
use std::fs;

pub fn execute(args: ExtractArgs, rules: &ValidationRules, output: &OutputWriter) -> Result<()> {
    if !args.submission.exists() {
        return Err(errors::file_not_found(&args.submission).into());
    }

    let content = fs::read_to_string(&args.submission)
        .with_context(|| format!("Failed to read {}", args.submission.display()))?;
    let submission: Map<String, Value> = serde_json::from_str(&content).map_err(|e| {
        errors::invalid_input_file(&args.submission, "a JSON object of submission fields", &e.to_string())
    })?;

    let mapping = FieldMapping {
        polygon_field: args.polygon_field,
        region_field: args.region_field,
        sub_region_field: args.sub_region_field,
        plot_name_field: args.plot_name_field,
    };
    let data = extract_plot_data(&submission, &mapping, rules);

    if output.is_json() {
        return output.result(data);
    }

    output.section("Plot");
    output.kv("Name", &data.plot_name);
    output.kv("Region", &data.region);
    output.kv("Sub-region", &data.sub_region);
    if let Some(field) = &data.polygon_source_field {
        output.kv("Polygon field", field);
    }
    if let Some(wkt) = &data.polygon_wkt {
        output.kv("WKT", wkt);
    }

    match &data.flagged_reason {
        Some(reason) => output.warning(format!("Flagged for review: {}", reason)),
        None if data.polygon_wkt.is_some() => output.success("Polygon is valid"),
        None => output.info("No polygon field configured"),
    }
    Ok(())
}
