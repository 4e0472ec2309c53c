//! Catalog wire types and the enriched item record

use serde::Deserialize;
use std::collections::BTreeMap;

/// Minimal record returned by a page request. Ephemeral; discarded once
/// enrichment completes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStub {
    pub identifier: String,
    pub detail_reference: String,
}

/// Response body of the paginated list endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub results: Vec<ItemStub>,
}

/// Reference to a nested resource requiring its own fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubResourceRef {
    pub identifier: String,
    pub reference: String,
}

/// Response body of the detail endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub display_name: String,

    /// Absent for items without artwork; callers substitute a fixed sentinel
    #[serde(default)]
    pub image_ref: Option<String>,

    #[serde(default)]
    pub category_tags: Vec<String>,

    #[serde(default)]
    pub numeric_attributes: BTreeMap<String, i64>,

    #[serde(default)]
    pub sub_resource_refs: Vec<SubResourceRef>,
}

/// One language variant of a sub-resource description
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub language: String,
    pub text: String,
}

/// Response body of the sub-resource endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubResourceRecord {
    pub name: String,

    #[serde(default)]
    pub localized_descriptions: Vec<LocalizedText>,
}

impl SubResourceRecord {
    /// First description in the given language, if any
    pub fn description_in(&self, language: &str) -> Option<&str> {
        self.localized_descriptions
            .iter()
            .find(|entry| entry.language == language)
            .map(|entry| entry.text.as_str())
    }
}

/// A resolved sub-resource ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubResource {
    pub name: String,
    pub description: String,
}

/// Fully-enriched catalog item. Immutable once constructed; the unit stored
/// in the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedItem {
    pub identifier: String,
    pub display_name: String,
    pub image_ref: String,
    pub category_tags: Vec<String>,
    pub numeric_attributes: BTreeMap<String, i64>,
    pub sub_resources: Vec<SubResource>,
}
