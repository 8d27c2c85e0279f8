//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;
use plotreview_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        return output.result(ConfigOutput {
            min_area_sq_meters: ConfigEntry {
                value: config.min_area_sq_meters.value.to_string(),
                source: config.min_area_sq_meters.source,
            },
            min_vertices: ConfigEntry {
                value: config.min_vertices.value.to_string(),
                source: config.min_vertices.source,
            },
            max_reason_len: ConfigEntry {
                value: config.max_reason_len.value.to_string(),
                source: config.max_reason_len.source,
            },
        });
    }

    output.section("Configuration");
    let mut entries: Vec<_> = config.to_inspection_map().into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, (value, source)) in entries {
        output.kv(key, format!("{} ({:?})", value, source));
    }
    Ok(())
}
