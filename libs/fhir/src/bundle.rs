//! Search-result bundle as returned by a FHIR REST endpoint.
//!
//! Entries keep their resources as raw JSON: a bundle may interleave
//! resource kinds (e.g. OperationOutcome entries), so callers pick out the
//! kind they asked for and ignore the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub resource_type: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BundleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<JsonValue>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            type_: None,
            total: None,
            entry: Vec::new(),
        }
    }
}

impl Bundle {
    /// Entry resources whose `resourceType` matches, in bundle order.
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<&JsonValue> {
        self.entry
            .iter()
            .filter_map(|entry| entry.resource.as_ref())
            .filter(|resource| {
                resource
                    .get("resourceType")
                    .and_then(JsonValue::as_str)
                    .is_some_and(|rt| rt == resource_type)
            })
            .collect()
    }
}
