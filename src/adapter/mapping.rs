//! Data-driven property mapping: which source columns feed which properties
//!
//! Each node label (or relationship type) owns an ordered list of
//! column-to-property renames. The projection machinery walks these lists
//! instead of hard-coding per-label branches, so adding a property to a
//! dataset is a one-line catalog change.

use serde::{Deserialize, Serialize};

/// One source column renamed to a loader-facing property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Column in the source table.
    pub column: String,
    /// Property name on the emitted record.
    pub property: String,
}

/// Ordered field mappings for one label or relationship type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMapping {
    pub label: String,
    pub fields: Vec<FieldMapping>,
}

impl PropertyMapping {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Append one column-to-property rename.
    pub fn with_field(mut self, column: impl Into<String>, property: impl Into<String>) -> Self {
        self.fields.push(FieldMapping {
            column: column.into(),
            property: property.into(),
        });
        self
    }
}

/// All property mappings for one dataset, looked up by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCatalog {
    mappings: Vec<PropertyMapping>,
}

impl PropertyCatalog {
    pub fn new(mappings: Vec<PropertyMapping>) -> Self {
        Self { mappings }
    }

    /// Mapping for a label, if the catalog declares one.
    pub fn get(&self, label: &str) -> Option<&PropertyMapping> {
        self.mappings.iter().find(|m| m.label == label)
    }

    /// Every mapping, in declaration order.
    pub fn mappings(&self) -> &[PropertyMapping] {
        &self.mappings
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|m| m.label.as_str())
    }

    /// Distinct source columns across all mappings, first-seen order.
    pub fn source_columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for mapping in &self.mappings {
            for field in &mapping.fields {
                if !columns.contains(&field.column) {
                    columns.push(field.column.clone());
                }
            }
        }
        columns
    }

    /// Catalog for the case-study dataset: eight node types.
    pub fn case_study() -> Self {
        Self::new(vec![
            PropertyMapping::new(":CaseStudy")
                .with_field("CaseStudyName", "name")
                .with_field("CaseStudyDescription", "description"),
            PropertyMapping::new(":Organ").with_field("OrganName", "name"),
            PropertyMapping::new(":Chemical")
                .with_field("ChemicalName", "name")
                .with_field("ChemicalCAS", "CAS")
                .with_field("SMILES", "SMILES")
                .with_field("InChIKey", "InChIKey")
                .with_field("chemical_group", "chemical_group"),
            PropertyMapping::new(":Model_system")
                .with_field("ModelSystemName", "name")
                .with_field("ModelSystemCellType", "cell_type")
                .with_field("ModelSystemDescription", "description"),
            PropertyMapping::new(":Computational_model")
                .with_field("ComputationalModelName", "name")
                .with_field("ComputationalModelType", "type")
                .with_field("ComputationalModelLanguage", "language")
                .with_field("ComputationalModelInput", "input")
                .with_field("ComputationalModelOutput", "output"),
            PropertyMapping::new(":Bioassay")
                .with_field("BioassayName", "name")
                .with_field("Measured", "measured"),
            PropertyMapping::new(":Experimental_condition")
                .with_field("exposure_duration", "exposure_duration")
                .with_field("exposure_concentration", "exposure_concentration")
                .with_field("condition_name", "condition_name")
                .with_field("ExperimentalConditionDescription", "description"),
            PropertyMapping::new(":Measurable_endpoint")
                .with_field("MeasurableEndpointName", "name")
                .with_field("MeasurableEndpointDescription", "description")
                .with_field("MeasurableEndpointType", "type"),
        ])
    }

    /// Catalog for AOP-Wiki exports: the AOP rows themselves.
    pub fn aop_wiki() -> Self {
        Self::new(vec![PropertyMapping::new(":AOP")
            .with_field("AOPName", "name")
            .with_field("AOPcreator", "creator")
            .with_field("AOPDescription", "description")
            .with_field("AOPsource", "source")])
    }

    /// Catalog for CompoundWiki exports: chemicals only.
    pub fn compound_wiki() -> Self {
        Self::new(vec![PropertyMapping::new(":Chemical")
            .with_field("ChemicalName", "name")
            .with_field("ChemicalCAS", "CAS")
            .with_field("SMILES", "SMILES")
            .with_field("InChIKey", "InChIKey")])
    }
}
