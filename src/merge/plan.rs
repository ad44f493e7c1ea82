//! Declarative merge plans: which tables, which foreign keys, where to write

use super::merger::MergeError;
use crate::adapter::PropertyCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One foreign-key column to lift into derived edge rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyRule {
    /// Column on the owning table holding the referenced id.
    pub column: String,
    /// Relationship type stamped on every derived edge.
    pub edge_type: String,
}

impl ForeignKeyRule {
    pub fn new(column: impl Into<String>, edge_type: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            edge_type: edge_type.into(),
        }
    }
}

/// One entity CSV and the foreign keys to lift off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySource {
    pub path: PathBuf,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyRule>,
}

impl EntitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            foreign_keys: Vec::new(),
        }
    }

    /// Add one foreign-key rule.
    pub fn with_foreign_key(
        mut self,
        column: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        self.foreign_keys.push(ForeignKeyRule::new(column, edge_type));
        self
    }

    /// File name for reports and logs; falls back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Everything one [`Merger`](super::Merger) run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergePlan {
    /// Entity tables, in the order their rows should appear.
    pub entities: Vec<EntitySource>,
    /// Columns guaranteed to exist in the output even when no input has them.
    #[serde(default)]
    pub ensure_columns: Vec<String>,
    /// Where the combined table is written.
    pub output: PathBuf,
}

impl MergePlan {
    /// Load a plan from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, MergeError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// The stock plan for the case-study dataset: eight entity tables and
    /// thirteen foreign-key rules, writing `Combined_output.csv` next to the
    /// inputs.
    pub fn case_study_default(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        let entity = |file: &str| EntitySource::new(dir.join(file));
        Self {
            entities: vec![
                entity("CaseStudy.csv")
                    .with_foreign_key("related_organ", "case_study_related_organ")
                    .with_foreign_key("related_chemical", "case_study_relevant_chemical")
                    .with_foreign_key("related_model_system", "case_study_relevant_model_system")
                    .with_foreign_key(
                        "related_computational_model",
                        "case_study_relevant_computational_model",
                    )
                    .with_foreign_key("related_endpoint", "case_study_relevant_endpoint"),
                entity("Organ.csv"),
                entity("Chemical.csv")
                    .with_foreign_key("measured_with_bioassay", "chemical_measured_with_bioassay")
                    .with_foreign_key(
                        "relevant_computational_model",
                        "chemical_relevant_to_computational_model",
                    )
                    .with_foreign_key(
                        "measured_in_model_system",
                        "chemical_measured_in_model_system",
                    ),
                entity("Model_system.csv")
                    .with_foreign_key("relevant_organ", "model_system_relevant_to_organ"),
                entity("Computational_model.csv")
                    .with_foreign_key("relevant_organ", "computational_model_relevant_to_organ"),
                entity("Bioassay.csv")
                    .with_foreign_key("related_model_system", "bioassay_executed_on_model_system")
                    .with_foreign_key("related_organ", "bioassay_related_organ")
                    .with_foreign_key(
                        "used_with_experimental_condition",
                        "bioassay_used_with_experimental_condition",
                    ),
                entity("ExperimentalCondition.csv"),
                entity("MeasurableEndpoint.csv"),
            ],
            ensure_columns: PropertyCatalog::case_study().source_columns(),
            output: dir.join("Combined_output.csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_case_study_plan_covers_all_tables_and_rules() {
        let plan = MergePlan::case_study_default("data");
        assert_eq!(plan.entities.len(), 8);
        let rules: usize = plan.entities.iter().map(|e| e.foreign_keys.len()).sum();
        assert_eq!(rules, 13);
        assert_eq!(plan.output, PathBuf::from("data/Combined_output.csv"));
        assert!(plan
            .ensure_columns
            .iter()
            .any(|c| c == "OrganName"));
    }

    #[test]
    fn plan_parses_from_yaml() {
        let yaml = "\
entities:
  - path: data/CaseStudy.csv
    foreign_keys:
      - column: related_organ
        edge_type: case_study_related_organ
  - path: data/Organ.csv
ensure_columns: [OrganName]
output: data/Combined_output.csv
";
        let plan: MergePlan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.entities.len(), 2);
        assert_eq!(
            plan.entities[0].foreign_keys,
            vec![ForeignKeyRule::new("related_organ", "case_study_related_organ")]
        );
        // A source without foreign_keys defaults to none
        assert!(plan.entities[1].foreign_keys.is_empty());
        assert_eq!(plan.entities[1].file_name(), "Organ.csv");
    }
}
