//! Built-in dataset profiles
//!
//! A profile captures everything shape-related about one source family:
//! where identifiers live, what labels and relationship types can occur,
//! which foreign keys become edges, and how columns map to properties.
//! Run-specific choices (input paths, allow-lists) stay in
//! [`AdapterConfig`](super::AdapterConfig).

use super::mapping::{PropertyCatalog, PropertyMapping};
use crate::merge::ForeignKeyRule;
use crate::table::{ID_COLUMN, LABEL_COLUMN};
use std::collections::BTreeSet;

/// Shape of an optional companion table streamed after the primary one.
#[derive(Debug, Clone)]
pub struct SecondaryTable {
    /// Identifier column; its absence is a construction error.
    pub key_column: String,
    /// Label applied to every row (the table carries none of its own).
    pub label: String,
    /// Property mappings for that label.
    pub catalog: PropertyCatalog,
}

/// Everything the adapter needs to know about one dataset family.
#[derive(Debug, Clone)]
pub struct DatasetProfile {
    /// Short name used in logs and CLI configuration.
    pub name: String,
    /// Column holding node identifiers in the primary table.
    pub id_column: String,
    /// Column holding node labels, when the primary table carries one.
    pub label_column: String,
    /// Label for node rows without one; `None` leaves them unlabeled.
    pub default_label: Option<String>,
    /// Property mappings for node labels.
    pub catalog: PropertyCatalog,
    /// Property mappings for relationship types. Empty for every built-in
    /// profile: none of these datasets put attributes on edges.
    pub edge_catalog: PropertyCatalog,
    /// Relationship types this dataset can produce.
    pub edge_types: Vec<String>,
    /// Labels that occur only as edge endpoints, never as rows; still part
    /// of the known-label set.
    pub endpoint_labels: Vec<String>,
    /// Foreign-key columns lifted into edge rows before classification.
    pub derived_edges: Vec<ForeignKeyRule>,
    /// Companion table description, when the dataset has one.
    pub secondary: Option<SecondaryTable>,
}

impl DatasetProfile {
    /// Look up a built-in profile by its CLI name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "case-study" => Some(Self::case_study()),
            "aop-wiki" => Some(Self::aop_wiki()),
            "compound-wiki" => Some(Self::compound_wiki()),
            _ => None,
        }
    }

    /// Names accepted by [`by_name`](Self::by_name).
    pub fn builtin_names() -> &'static [&'static str] {
        &["case-study", "aop-wiki", "compound-wiki"]
    }

    /// The merged case-study table: eight node types, thirteen edge types,
    /// edges already materialized as rows by the merger.
    pub fn case_study() -> Self {
        Self {
            name: "case-study".to_string(),
            id_column: ID_COLUMN.to_string(),
            label_column: LABEL_COLUMN.to_string(),
            default_label: None,
            catalog: PropertyCatalog::case_study(),
            edge_catalog: PropertyCatalog::default(),
            edge_types: [
                "case_study_related_organ",
                "case_study_relevant_chemical",
                "case_study_relevant_model_system",
                "case_study_relevant_computational_model",
                "chemical_measured_with_bioassay",
                "bioassay_executed_on_model_system",
                "bioassay_related_organ",
                "chemical_relevant_to_computational_model",
                "chemical_measured_in_model_system",
                "model_system_relevant_to_organ",
                "computational_model_relevant_to_organ",
                "case_study_relevant_endpoint",
                "bioassay_used_with_experimental_condition",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            endpoint_labels: Vec::new(),
            derived_edges: Vec::new(),
            secondary: None,
        }
    }

    /// Raw AOP-Wiki exports: one row per AOP, relationships still sitting in
    /// foreign-key columns, key events in a companion table.
    pub fn aop_wiki() -> Self {
        Self {
            name: "aop-wiki".to_string(),
            id_column: "AOPID".to_string(),
            label_column: LABEL_COLUMN.to_string(),
            default_label: Some(":AOP".to_string()),
            catalog: PropertyCatalog::aop_wiki(),
            edge_catalog: PropertyCatalog::default(),
            edge_types: [
                "AOP_includes_mie",
                "AOP_includes_ao",
                "AOP_includes_key_event",
                "AOP_relevant_stressor",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            endpoint_labels: vec![":Stressor".to_string()],
            derived_edges: vec![
                ForeignKeyRule::new("MIE", "AOP_includes_mie"),
                ForeignKeyRule::new("AO", "AOP_includes_ao"),
                ForeignKeyRule::new("AOPKE", "AOP_includes_key_event"),
                ForeignKeyRule::new("AOPStressor", "AOP_relevant_stressor"),
            ],
            secondary: Some(SecondaryTable {
                key_column: "KEID".to_string(),
                label: ":KeyEvent".to_string(),
                catalog: PropertyCatalog::new(vec![PropertyMapping::new(":KeyEvent")
                    .with_field("KEName", "name")
                    .with_field("KEDescription", "description")]),
            }),
        }
    }

    /// CompoundWiki exports: chemicals only, no relationships.
    pub fn compound_wiki() -> Self {
        Self {
            name: "compound-wiki".to_string(),
            id_column: ID_COLUMN.to_string(),
            label_column: LABEL_COLUMN.to_string(),
            default_label: None,
            catalog: PropertyCatalog::compound_wiki(),
            edge_catalog: PropertyCatalog::default(),
            edge_types: Vec::new(),
            endpoint_labels: Vec::new(),
            derived_edges: Vec::new(),
            secondary: None,
        }
    }

    /// Every label this profile can emit: catalog labels, endpoint-only
    /// labels, and the secondary table's label.
    pub(crate) fn known_node_types(&self) -> BTreeSet<String> {
        let mut known: BTreeSet<String> = self.catalog.labels().map(str::to_string).collect();
        known.extend(self.endpoint_labels.iter().cloned());
        if let Some(secondary) = &self.secondary {
            known.insert(secondary.label.clone());
            known.extend(secondary.catalog.labels().map(str::to_string));
        }
        known
    }

    /// Every source column that can feed a node property.
    pub(crate) fn known_node_fields(&self) -> BTreeSet<String> {
        let mut known: BTreeSet<String> = self.catalog.source_columns().into_iter().collect();
        if let Some(secondary) = &self.secondary {
            known.extend(secondary.catalog.source_columns());
        }
        known
    }

    /// Every relationship type this profile can emit.
    pub(crate) fn known_edge_types(&self) -> BTreeSet<String> {
        self.edge_types.iter().cloned().collect()
    }

    /// Every source column that can feed an edge property.
    pub(crate) fn known_edge_fields(&self) -> BTreeSet<String> {
        self.edge_catalog.source_columns().into_iter().collect()
    }
}
