//! Merges per-entity tables into one sentinel-encoded node+edge table
//!
//! Each input table contributes its rows as node rows. Foreign-key columns
//! named by the plan are lifted into derived edge rows (null `_id`, endpoints
//! in `_start`/`_end`, relationship type in `_type`) which are appended
//! beneath the node rows. The result is sorted nulls-first by `_id` then
//! `_start`, so edges lead and nodes follow grouped by identifier.

use super::plan::{ForeignKeyRule, MergePlan};
use crate::table::{
    read_frame, write_frame, TableError, TableFrame, END_COLUMN, ID_COLUMN, START_COLUMN,
    TYPE_COLUMN,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from loading a plan or running a merge.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("merge plan error: {0}")]
    Plan(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An edge lifted from a foreign-key cell, before it becomes a table row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DerivedEdge {
    pub start: String,
    pub end: String,
    pub edge_type: String,
}

/// Pull foreign-key references out of `frame` as derived edges.
///
/// For each rule, every row where both the id cell and the foreign-key cell
/// are non-null yields one edge (id → reference); the extracted cell is then
/// blanked so the value does not linger on the node row. A rule whose column
/// is missing derives nothing and logs a warning.
pub(crate) fn extract_foreign_key_edges(
    frame: &mut TableFrame,
    id_column: &str,
    rules: &[ForeignKeyRule],
) -> Vec<DerivedEdge> {
    let mut derived = Vec::new();
    let Some(id_idx) = frame.column_index(id_column) else {
        if !rules.is_empty() {
            warn!("id column '{}' missing; no edges derived", id_column);
        }
        return derived;
    };
    for rule in rules {
        let Some(fk_idx) = frame.column_index(&rule.column) else {
            warn!(
                "foreign-key column '{}' missing; no '{}' edges derived",
                rule.column, rule.edge_type
            );
            continue;
        };
        let before = derived.len();
        for row in 0..frame.row_count() {
            let start = frame.cell(row, id_idx).map(str::to_string);
            let end = frame.cell(row, fk_idx).map(str::to_string);
            if let (Some(start), Some(end)) = (start, end) {
                derived.push(DerivedEdge {
                    start,
                    end,
                    edge_type: rule.edge_type.clone(),
                });
                frame.set_cell(row, fk_idx, None);
            }
        }
        debug!("derived {} '{}' edges", derived.len() - before, rule.edge_type);
    }
    derived
}

/// Append one edge row per derived edge: null `_id`, endpoints, type.
/// The sentinel columns are created if the frame lacks them.
pub(crate) fn append_edge_rows(frame: &mut TableFrame, edges: &[DerivedEdge]) {
    let start_idx = frame.ensure_column(START_COLUMN);
    let end_idx = frame.ensure_column(END_COLUMN);
    let type_idx = frame.ensure_column(TYPE_COLUMN);
    let width = frame.columns().len();
    for edge in edges {
        let mut row = vec![None; width];
        row[start_idx] = Some(edge.start.clone());
        row[end_idx] = Some(edge.end.clone());
        row[type_idx] = Some(edge.edge_type.clone());
        frame.push_row(row);
    }
}

/// Outcome summary of one merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// (file name, row count) per input table, in plan order.
    pub tables: Vec<(String, usize)>,
    /// Node rows in the combined output.
    pub node_rows: usize,
    /// Derived edge rows in the combined output.
    pub edge_rows: usize,
    /// Derived edge counts keyed by relationship type.
    pub edges_by_type: BTreeMap<String, usize>,
}

/// Executes a [`MergePlan`]: read, derive, union, sort, write.
pub struct Merger {
    plan: MergePlan,
}

impl Merger {
    pub fn new(plan: MergePlan) -> Self {
        Self { plan }
    }

    /// Run the merge and write the combined table to the plan's output path.
    ///
    /// Every step is deterministic and the stale output file is overwritten,
    /// so rerunning against unchanged inputs reproduces the file byte for
    /// byte.
    pub fn run(&self) -> Result<MergeReport, MergeError> {
        let mut report = MergeReport::default();
        let mut combined = TableFrame::empty();
        let mut derived: Vec<DerivedEdge> = Vec::new();

        for entity in &self.plan.entities {
            let mut frame = read_frame(&entity.path)?;
            report.tables.push((entity.file_name(), frame.row_count()));
            derived.extend(extract_foreign_key_edges(
                &mut frame,
                ID_COLUMN,
                &entity.foreign_keys,
            ));
            combined.outer_union(&frame);
        }
        report.node_rows = combined.row_count();

        for column in &self.plan.ensure_columns {
            combined.ensure_column(column);
        }

        report.edge_rows = derived.len();
        for edge in &derived {
            *report
                .edges_by_type
                .entry(edge.edge_type.clone())
                .or_insert(0) += 1;
        }
        append_edge_rows(&mut combined, &derived);

        combined.sort_rows(&[ID_COLUMN, START_COLUMN]);
        write_frame(&combined, &self.plan.output)?;
        info!(
            "merged {} tables into {} ({} node rows, {} edge rows)",
            report.tables.len(),
            self.plan.output.display(),
            report.node_rows,
            report.edge_rows
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::EntitySource;
    use crate::table::LABEL_COLUMN;
    use tempfile::TempDir;

    fn frame_with(columns: &[&str], rows: Vec<Vec<Option<&str>>>) -> TableFrame {
        let mut frame = TableFrame::new(columns.iter().map(|s| s.to_string()).collect());
        for row in rows {
            frame.push_row(row.into_iter().map(|c| c.map(str::to_string)).collect());
        }
        frame
    }

    #[test]
    fn derives_one_edge_per_row_with_both_cells_set() {
        let mut frame = frame_with(
            &[ID_COLUMN, "related_organ"],
            vec![
                vec![Some("CS1"), Some("O1")],
                vec![Some("CS2"), None],
                vec![None, Some("O2")],
            ],
        );
        let rules = vec![ForeignKeyRule::new("related_organ", "case_study_related_organ")];

        let derived = extract_foreign_key_edges(&mut frame, ID_COLUMN, &rules);
        assert_eq!(
            derived,
            vec![DerivedEdge {
                start: "CS1".to_string(),
                end: "O1".to_string(),
                edge_type: "case_study_related_organ".to_string(),
            }]
        );
        // The extracted cell is blanked; untouched cells keep their values
        assert_eq!(frame.cell_by_name(0, "related_organ"), None);
        assert_eq!(frame.cell_by_name(0, ID_COLUMN), Some("CS1"));
        assert_eq!(frame.cell_by_name(2, "related_organ"), Some("O2"));
    }

    #[test]
    fn missing_foreign_key_column_derives_nothing() {
        let mut frame = frame_with(&[ID_COLUMN], vec![vec![Some("CS1")]]);
        let rules = vec![ForeignKeyRule::new("absent", "some_edge")];
        assert!(extract_foreign_key_edges(&mut frame, ID_COLUMN, &rules).is_empty());
    }

    #[test]
    fn appended_edge_rows_have_null_id_and_filled_sentinels() {
        let mut frame = frame_with(&[ID_COLUMN, LABEL_COLUMN], vec![vec![Some("N1"), Some(":A")]]);
        append_edge_rows(
            &mut frame,
            &[DerivedEdge {
                start: "N1".to_string(),
                end: "N2".to_string(),
                edge_type: "rel".to_string(),
            }],
        );
        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.cell_by_name(1, ID_COLUMN), None);
        assert_eq!(frame.cell_by_name(1, START_COLUMN), Some("N1"));
        assert_eq!(frame.cell_by_name(1, END_COLUMN), Some("N2"));
        assert_eq!(frame.cell_by_name(1, TYPE_COLUMN), Some("rel"));
    }

    fn write_fixture(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    fn two_table_plan(dir: &TempDir) -> MergePlan {
        write_fixture(
            dir,
            "CaseStudy.csv",
            "_id,_labels,CaseStudyName,CaseStudyDescription,related_organ\n\
             CS1,:CaseStudy,Liver toxicity,A liver case study,O1\n",
        );
        write_fixture(dir, "Organ.csv", "_id,_labels,OrganName\nO1,:Organ,Liver\n");
        MergePlan {
            entities: vec![
                EntitySource::new(dir.path().join("CaseStudy.csv"))
                    .with_foreign_key("related_organ", "case_study_related_organ"),
                EntitySource::new(dir.path().join("Organ.csv")),
            ],
            ensure_columns: vec!["OrganName".to_string()],
            output: dir.path().join("Combined_output.csv"),
        }
    }

    #[test]
    fn run_unions_tables_and_appends_derived_edges() {
        let dir = TempDir::new().unwrap();
        let plan = two_table_plan(&dir);
        let output = plan.output.clone();

        let report = Merger::new(plan).run().unwrap();
        assert_eq!(report.node_rows, 2);
        assert_eq!(report.edge_rows, 1);
        assert_eq!(report.edges_by_type["case_study_related_organ"], 1);
        assert_eq!(
            report.tables,
            vec![("CaseStudy.csv".to_string(), 1), ("Organ.csv".to_string(), 1)]
        );

        let combined = read_frame(&output).unwrap();
        assert_eq!(combined.row_count(), 3);

        // Null `_id` sorts first: the derived edge row leads
        assert_eq!(combined.cell_by_name(0, ID_COLUMN), None);
        assert_eq!(combined.cell_by_name(0, START_COLUMN), Some("CS1"));
        assert_eq!(combined.cell_by_name(0, END_COLUMN), Some("O1"));
        assert_eq!(
            combined.cell_by_name(0, TYPE_COLUMN),
            Some("case_study_related_organ")
        );

        // Node rows follow in id order, with the foreign key blanked
        assert_eq!(combined.cell_by_name(1, ID_COLUMN), Some("CS1"));
        assert_eq!(combined.cell_by_name(1, "related_organ"), None);
        assert_eq!(combined.cell_by_name(2, ID_COLUMN), Some("O1"));
        assert_eq!(combined.cell_by_name(2, "OrganName"), Some("Liver"));
    }

    #[test]
    fn rerunning_the_same_plan_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let plan = two_table_plan(&dir);
        let output = plan.output.clone();
        let merger = Merger::new(plan);

        merger.run().unwrap();
        let first = std::fs::read(&output).unwrap();
        merger.run().unwrap();
        let second = std::fs::read(&output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ensure_columns_appear_even_without_input_data() {
        let dir = TempDir::new().unwrap();
        write_fixture(&dir, "Organ.csv", "_id,_labels\nO1,:Organ\n");
        let plan = MergePlan {
            entities: vec![EntitySource::new(dir.path().join("Organ.csv"))],
            ensure_columns: vec!["OrganName".to_string()],
            output: dir.path().join("out.csv"),
        };
        Merger::new(plan).run().unwrap();
        let combined = read_frame(dir.path().join("out.csv")).unwrap();
        assert!(combined.has_column("OrganName"));
        assert_eq!(combined.cell_by_name(0, "OrganName"), None);
    }
}
