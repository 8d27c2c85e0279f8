use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default minimum number of ring vertices: three distinct points plus the closing point
pub const DEFAULT_MIN_VERTICES: usize = 4;

/// Default minimum plot area in square meters
pub const DEFAULT_MIN_AREA_SQ_METERS: f64 = 10.0;

/// Default maximum length of a stored flag reason
pub const DEFAULT_MAX_REASON_LEN: usize = 500;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Thresholds applied when validating polygons and writing flag reasons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    pub min_vertices: usize,
    pub min_area_sq_meters: f64,
    pub max_reason_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_vertices: DEFAULT_MIN_VERTICES,
            min_area_sq_meters: DEFAULT_MIN_AREA_SQ_METERS,
            max_reason_len: DEFAULT_MAX_REASON_LEN,
        }
    }
}

/// Layered configuration for plotreview
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub min_area_sq_meters: ConfigValue<f64>,
    pub min_vertices: ConfigValue<usize>,
    pub max_reason_len: ConfigValue<usize>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            min_area_sq_meters: ConfigValue::new(
                DEFAULT_MIN_AREA_SQ_METERS,
                ConfigSource::Default,
            ),
            min_vertices: ConfigValue::new(DEFAULT_MIN_VERTICES, ConfigSource::Default),
            max_reason_len: ConfigValue::new(DEFAULT_MAX_REASON_LEN, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| PlotError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| PlotError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(area) = file_config.min_area_sq_meters {
            self.min_area_sq_meters.update(parse_min_area_value(area)?, ConfigSource::File);
        }

        if let Some(vertices) = file_config.min_vertices {
            self.min_vertices.update(parse_min_vertices_value(vertices)?, ConfigSource::File);
        }

        if let Some(len) = file_config.max_reason_len {
            self.max_reason_len.update(parse_reason_len_value(len)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // PLOTREVIEW_MIN_AREA_SQ_METERS
        if let Ok(area_str) = env::var("PLOTREVIEW_MIN_AREA_SQ_METERS") {
            match parse_min_area(&area_str) {
                Ok(area) => self.min_area_sq_meters.update(area, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLOTREVIEW_MIN_AREA_SQ_METERS value '{}': expected a non-negative number",
                    area_str
                ),
            }
        }

        // PLOTREVIEW_MIN_VERTICES
        if let Ok(vertices_str) = env::var("PLOTREVIEW_MIN_VERTICES") {
            match parse_min_vertices(&vertices_str) {
                Ok(vertices) => self.min_vertices.update(vertices, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLOTREVIEW_MIN_VERTICES value '{}': expected an integer of at least 4",
                    vertices_str
                ),
            }
        }

        // PLOTREVIEW_MAX_REASON_LEN
        if let Ok(len_str) = env::var("PLOTREVIEW_MAX_REASON_LEN") {
            match parse_reason_len(&len_str) {
                Ok(len) => self.max_reason_len.update(len, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLOTREVIEW_MAX_REASON_LEN value '{}': expected an integer greater than 3",
                    len_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(area) = overrides.min_area_sq_meters {
            self.min_area_sq_meters.update(area, ConfigSource::Cli);
        }

        if let Some(vertices) = overrides.min_vertices {
            self.min_vertices.update(vertices, ConfigSource::Cli);
        }

        if let Some(len) = overrides.max_reason_len {
            self.max_reason_len.update(len, ConfigSource::Cli);
        }
    }

    /// Effective thresholds for validation and flagging
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            min_vertices: self.min_vertices.value,
            min_area_sq_meters: self.min_area_sq_meters.value,
            max_reason_len: self.max_reason_len.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "min_area_sq_meters".to_string(),
            (self.min_area_sq_meters.value.to_string(), self.min_area_sq_meters.source),
        );

        map.insert(
            "min_vertices".to_string(),
            (self.min_vertices.value.to_string(), self.min_vertices.source),
        );

        map.insert(
            "max_reason_len".to_string(),
            (self.max_reason_len.value.to_string(), self.max_reason_len.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    min_area_sq_meters: Option<f64>,
    min_vertices: Option<usize>,
    max_reason_len: Option<usize>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub min_area_sq_meters: Option<f64>,
    pub min_vertices: Option<usize>,
    pub max_reason_len: Option<usize>,
}

/// Parse a minimum area from string
pub fn parse_min_area(s: &str) -> Result<f64> {
    let area = s.trim().parse::<f64>().map_err(|_| PlotError::ConfigInvalid {
        key: "min_area_sq_meters".to_string(),
        reason: format!("Invalid number: {}", s),
    })?;
    parse_min_area_value(area)
}

/// Parse a minimum vertex count from string
pub fn parse_min_vertices(s: &str) -> Result<usize> {
    let vertices = s.trim().parse::<usize>().map_err(|_| PlotError::ConfigInvalid {
        key: "min_vertices".to_string(),
        reason: format!("Invalid integer: {}", s),
    })?;
    parse_min_vertices_value(vertices)
}

/// Parse a maximum reason length from string
pub fn parse_reason_len(s: &str) -> Result<usize> {
    let len = s.trim().parse::<usize>().map_err(|_| PlotError::ConfigInvalid {
        key: "max_reason_len".to_string(),
        reason: format!("Invalid integer: {}", s),
    })?;
    parse_reason_len_value(len)
}

fn parse_min_area_value(area: f64) -> Result<f64> {
    if !area.is_finite() || area < 0.0 {
        return Err(PlotError::ConfigInvalid {
            key: "min_area_sq_meters".to_string(),
            reason: format!("Area must be a non-negative number, got {}", area),
        });
    }
    Ok(area)
}

fn parse_min_vertices_value(vertices: usize) -> Result<usize> {
    if vertices < DEFAULT_MIN_VERTICES {
        return Err(PlotError::ConfigInvalid {
            key: "min_vertices".to_string(),
            reason: format!(
                "A closed ring needs at least {} vertices, got {}",
                DEFAULT_MIN_VERTICES, vertices
            ),
        });
    }
    Ok(vertices)
}

// Room for the "..." truncation marker plus at least one character.
fn parse_reason_len_value(len: usize) -> Result<usize> {
    if len <= 3 {
        return Err(PlotError::ConfigInvalid {
            key: "max_reason_len".to_string(),
            reason: format!("Reason length must be greater than 3, got {}", len),
        });
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.min_area_sq_meters.value, 10.0);
        assert_eq!(config.min_area_sq_meters.source, ConfigSource::Default);
        assert_eq!(config.min_vertices.value, 4);
        assert_eq!(config.max_reason_len.value, 500);
        assert_eq!(config.rules(), ValidationRules::default());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
min_area_sq_meters = 25.5
min_vertices = 5
max_reason_len = 200
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.min_area_sq_meters.value, 25.5);
        assert_eq!(config.min_area_sq_meters.source, ConfigSource::File);
        assert_eq!(config.min_vertices.value, 5);
        assert_eq!(config.max_reason_len.value, 200);
    }

    #[test]
    fn test_file_rejects_out_of_range_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "min_vertices = 2").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(PlotError::ConfigInvalid { key, .. }) if key == "min_vertices"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/plotreview.toml");
        assert!(matches!(result, Err(PlotError::ConfigInvalid { key, .. }) if key == "file"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            min_area_sq_meters: Some(50.0),
            min_vertices: None,
            max_reason_len: None,
        };

        config.update_from_cli(overrides);

        assert_eq!(config.min_area_sq_meters.value, 50.0);
        assert_eq!(config.min_area_sq_meters.source, ConfigSource::Cli);
        assert_eq!(config.min_vertices.source, ConfigSource::Default);
        assert_eq!(config.rules().min_area_sq_meters, 50.0);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_min_area("12.5").unwrap(), 12.5);
        assert!(parse_min_area("-1").is_err());
        assert!(parse_min_area("NaN").is_err());
        assert!(parse_min_area("lots").is_err());

        assert_eq!(parse_min_vertices(" 6 ").unwrap(), 6);
        assert!(parse_min_vertices("3").is_err());

        assert_eq!(parse_reason_len("120").unwrap(), 120);
        assert!(parse_reason_len("3").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("min_area_sq_meters"));
        assert!(map.contains_key("min_vertices"));
        assert!(map.contains_key("max_reason_len"));

        let (value, source) = &map["min_vertices"];
        assert_eq!(value, "4");
        assert_eq!(*source, ConfigSource::Default);
    }
}
