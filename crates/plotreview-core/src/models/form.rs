use serde::{Deserialize, Serialize};

/// How a form's submission fields map onto plot attributes.
///
/// Each entry is a comma-separated list of submission field names, as
/// configured on the form in the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Fallback list: the first field with a non-empty value is used
    #[serde(default)]
    pub polygon_field: Option<String>,

    /// Non-empty values joined with `" - "`
    #[serde(default)]
    pub region_field: Option<String>,

    /// Non-empty values joined with `" - "`
    #[serde(default)]
    pub sub_region_field: Option<String>,

    /// Non-empty values joined with spaces
    #[serde(default)]
    pub plot_name_field: Option<String>,
}

impl FieldMapping {
    pub fn polygon_fields(&self) -> Vec<String> {
        split_field_list(self.polygon_field.as_deref())
    }

    pub fn region_fields(&self) -> Vec<String> {
        split_field_list(self.region_field.as_deref())
    }

    pub fn sub_region_fields(&self) -> Vec<String> {
        split_field_list(self.sub_region_field.as_deref())
    }

    pub fn plot_name_fields(&self) -> Vec<String> {
        split_field_list(self.plot_name_field.as_deref())
    }
}

/// Split a comma-separated field list into trimmed, non-empty names
pub fn split_field_list(spec: Option<&str>) -> Vec<String> {
    spec.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
