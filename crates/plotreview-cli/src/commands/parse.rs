//! Parse command implementation

use crate::cli::WktArgs;
use crate::output::OutputWriter;
use crate::output_types::ParseOutput;
use anyhow::Result;
use plotreview_geo::parse_wkt_polygon_report;

pub fn execute(args: WktArgs, output: &OutputWriter) -> Result<()> {
    let parsed = parse_wkt_polygon_report(&args.wkt);

    if output.is_json() {
        return output.result(ParseOutput {
            vertex_count: parsed.coords.len(),
            dropped: parsed.dropped,
            coords: parsed.coords,
        });
    }

    if parsed.is_empty() {
        output.warning("No vertices found; input is empty or not a single-ring POLYGON");
    }
    output.kv("Vertices", parsed.coords.len());
    if parsed.dropped > 0 {
        output.warning(format!("Dropped {} malformed vertices", parsed.dropped));
    }
    output.data(&parsed.coords)
}
