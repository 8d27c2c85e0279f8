//! Geoshape command implementation

use crate::cli::{GeoshapeArgs, GeoshapeCommand};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{GeoshapeOutput, WktOutput};
use anyhow::Result;
use plotreview_geo::{parse_odk_geoshape, to_wkt_polygon, wkt_to_odk_geoshape};

pub fn execute(args: GeoshapeArgs, output: &OutputWriter) -> Result<()> {
    match args.command {
        GeoshapeCommand::ToWkt { geoshape } => {
            let coords = parse_odk_geoshape(&geoshape).ok_or_else(errors::invalid_geoshape)?;
            let wkt = to_wkt_polygon(&coords);

            if output.is_json() {
                output.result(WktOutput { wkt })
            } else {
                println!("{}", wkt);
                Ok(())
            }
        }
        GeoshapeCommand::FromWkt { wkt } => {
            let geoshape = wkt_to_odk_geoshape(&wkt).ok_or_else(|| errors::empty_ring(&wkt))?;

            if output.is_json() {
                output.result(GeoshapeOutput { geoshape })
            } else {
                println!("{}", geoshape);
                Ok(())
            }
        }
    }
}
