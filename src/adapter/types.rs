//! Graph record types handed to the bulk loader

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property bag keyed by loader-facing property names.
///
/// A `BTreeMap` keeps serialized output deterministic; a key mapped to `None`
/// means the property is declared for the label but had no value.
pub type PropertyMap = BTreeMap<String, Option<String>>;

/// A node ready for loading: identifier, label, properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Source identifier, passed through even when the source left it null.
    pub id: Option<String>,
    /// Node label, e.g. `:Chemical`.
    pub label: String,
    pub properties: PropertyMap,
}

impl NodeRecord {
    /// Record with an empty property bag.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Add one property value.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), Some(value.into()));
        self
    }

    /// Declare a property that has no value.
    pub fn with_null_property(mut self, name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), None);
        self
    }
}

/// An edge ready for loading. Endpoints are passed through unchecked; this
/// pipeline never assigns edge identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Relationship type, e.g. `case_study_related_organ`. Serialized as
    /// `type`, which Rust reserves.
    #[serde(rename = "type")]
    pub edge_type: String,
    pub properties: PropertyMap,
}

impl EdgeRecord {
    /// Edge with both endpoints set and an empty property bag.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            start: Some(start.into()),
            end: Some(end.into()),
            edge_type: edge_type.into(),
            properties: PropertyMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_record_serializes_null_values_explicitly() {
        let record = NodeRecord::new("O1", ":Organ")
            .with_property("name", "Liver")
            .with_null_property("description");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":"O1","label":":Organ","properties":{"description":null,"name":"Liver"}}"#
        );
    }

    #[test]
    fn edge_record_has_no_id_by_default() {
        let record = EdgeRecord::new("CS1", "O1", "case_study_related_organ");
        assert_eq!(record.id, None);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":null,"start":"CS1","end":"O1","type":"case_study_related_organ","properties":{}}"#
        );
    }
}
