//! Serialize command implementation

use crate::cli::SerializeArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::WktOutput;
use anyhow::Result;
use plotreview_core::models::LatLng;
use plotreview_geo::to_wkt_polygon;

pub fn execute(args: SerializeArgs, output: &OutputWriter) -> Result<()> {
    let coords: Vec<LatLng> = serde_json::from_str(&args.coords)
        .map_err(|e| errors::invalid_coordinates(&e.to_string()))?;

    if let Some(bad) = coords.iter().find(|point| !point.is_finite()) {
        return Err(errors::invalid_coordinates(&format!("non-finite vertex {:?}", bad)).into());
    }

    let wkt = to_wkt_polygon(&coords);
    if coords.is_empty() {
        output.warning("Empty ring serializes to an empty string, which is not valid WKT");
    }

    if output.is_json() {
        output.result(WktOutput { wkt })
    } else {
        println!("{}", wkt);
        Ok(())
    }
}
