//! Overlaps command implementation

use crate::cli::OverlapsArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{OverlapsOutput, PlotFlagRow};
use anyhow::{Context, Result};
use plotreview_core::models::Plot;
use plotreview_core::ValidationRules;
use plotreview_curation::{
    flag_all_overlaps, is_overlap_candidate, revalidate_plot, RevalidateOutcome,
};
use std::fs;

pub fn execute(args: OverlapsArgs, rules: &ValidationRules, output: &OutputWriter) -> Result<()> {
    if !args.plots.exists() {
        return Err(errors::file_not_found(&args.plots).into());
    }

    let content = fs::read_to_string(&args.plots)
        .with_context(|| format!("Failed to read {}", args.plots.display()))?;
    let mut plots: Vec<Plot> = serde_json::from_str(&content).map_err(|e| {
        errors::invalid_input_file(&args.plots, "a JSON array of plots", &e.to_string())
    })?;

    let outcomes: Vec<Option<RevalidateOutcome>> = if args.revalidate {
        plots.iter_mut().map(|plot| Some(revalidate_plot(plot, rules))).collect()
    } else {
        vec![None; plots.len()]
    };

    // Plots flagged by a failed validation keep that flag
    let checked = plots.iter().filter(|plot| is_overlap_candidate(plot)).count();
    let overlapping = flag_all_overlaps(&mut plots, rules);
    tracing::info!(plots = plots.len(), checked, overlapping, "Overlap check complete");

    if let Some(path) = &args.write {
        let updated = serde_json::to_string_pretty(&plots)?;
        fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let rows: Vec<PlotFlagRow> = plots
        .iter()
        .zip(outcomes)
        .map(|(plot, geometry)| PlotFlagRow {
            uuid: plot.uuid.clone(),
            name: plot.display_name().to_string(),
            status: plot.status(),
            geometry,
            flagged: plot.is_flagged(),
            reason: plot.flagged_reason.clone(),
        })
        .collect();

    if output.is_json() {
        return output.result(OverlapsOutput { checked, overlapping, plots: rows });
    }

    output.section("Plots");
    output.table(rows)?;
    output.kv("Checked", checked);
    output.kv("Overlapping", overlapping);
    if let Some(path) = &args.write {
        output.success(format!("Wrote updated plots to {}", path.display()));
    }
    Ok(())
}
