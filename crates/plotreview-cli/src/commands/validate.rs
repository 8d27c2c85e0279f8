//! Validate command implementation

use crate::cli::WktArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::ValidateOutput;
use anyhow::Result;
use plotreview_core::ValidationRules;
use plotreview_geo::{area_sq_meters, parse_wkt_polygon_report, validate_polygon};

pub fn execute(args: WktArgs, rules: &ValidationRules, output: &OutputWriter) -> Result<()> {
    let parsed = parse_wkt_polygon_report(&args.wkt);
    if parsed.is_empty() {
        return Err(errors::empty_ring(&args.wkt).into());
    }

    let result = validate_polygon(&parsed.coords, rules);
    let area = area_sq_meters(&parsed.coords);

    if output.is_json() {
        let failure = result.first_reason().map(errors::invalid_polygon);
        output.result(ValidateOutput {
            is_valid: result.is_valid,
            vertex_count: parsed.coords.len(),
            dropped: parsed.dropped,
            area_sq_meters: area,
            errors: result.errors,
        })?;
        return failure.map_or(Ok(()), |error| Err(error.into()));
    }

    output.kv("Vertices", parsed.coords.len());
    output.kv("Area", format!("{:.2} m²", area));
    if parsed.dropped > 0 {
        output.warning(format!("Dropped {} malformed vertices", parsed.dropped));
    }

    match result.first_reason() {
        None => {
            output.success("Polygon is valid");
            Ok(())
        }
        Some(reason) => {
            for error in &result.errors {
                output.error(format!("{}: {}", error.location, error.reason));
            }
            Err(errors::invalid_polygon(reason).into())
        }
    }
}
