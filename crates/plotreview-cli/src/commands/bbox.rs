//! Bounding box command implementation

use crate::cli::WktArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::BboxOutput;
use anyhow::Result;
use plotreview_geo::{bounding_box, parse_wkt_polygon};

pub fn execute(args: WktArgs, output: &OutputWriter) -> Result<()> {
    let coords = parse_wkt_polygon(&args.wkt);
    let bbox = bounding_box(&coords).map_err(|_| errors::empty_ring(&args.wkt))?;

    if output.is_json() {
        output.result(BboxOutput { bbox })
    } else {
        output.section("Bounding Box");
        output.kv("Min latitude", bbox.min_lat);
        output.kv("Max latitude", bbox.max_lat);
        output.kv("Min longitude", bbox.min_lon);
        output.kv("Max longitude", bbox.max_lon);
        Ok(())
    }
}
