//! Streaming adapter: sentinel-encoded tables in, graph records out

use super::config::{AdapterConfig, ResolvedFilters};
use super::mapping::PropertyCatalog;
use super::profile::DatasetProfile;
use super::types::{EdgeRecord, NodeRecord, PropertyMap};
use crate::merge::{append_edge_rows, extract_foreign_key_edges};
use crate::table::{
    read_frame, ClassifiedTable, EdgeRow, NodeRow, SourceSpec, TableError, TableFrame,
};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while building an adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A column the profile requires is absent from the input.
    #[error("required column '{column}' missing from {table}")]
    MissingColumn { table: String, column: String },
    /// A secondary table was supplied for a profile that has none.
    #[error("profile '{0}' does not define a secondary table")]
    NoSecondaryTable(String),
    #[error("table error: {0}")]
    Table(#[from] TableError),
}

/// One resolved projection field: source column, target property, and the
/// column's position if the table actually has it.
#[derive(Debug, Clone)]
struct ProjectedField {
    column: String,
    property: String,
    index: Option<usize>,
}

/// Projection fields per label (or relationship type), resolved against one
/// table's columns.
type ProjectionPlan = HashMap<String, Vec<ProjectedField>>;

#[derive(Debug)]
struct AdapterSource {
    table: ClassifiedTable,
    node_projection: ProjectionPlan,
    edge_projection: ProjectionPlan,
}

/// Streams a sentinel-encoded table as typed graph records.
///
/// Construction is the fail-fast boundary: loading, foreign-key derivation,
/// classification, and projection resolution all happen up front, so the
/// produce methods cannot themselves fail. Each call to
/// [`produce_nodes`](Self::produce_nodes) or
/// [`produce_edges`](Self::produce_edges) returns a fresh iterator over the
/// same classified data; the two streams can be consumed any number of times
/// in any order.
#[derive(Debug)]
pub struct TableAdapter {
    profile: DatasetProfile,
    filters: ResolvedFilters,
    sources: Vec<AdapterSource>,
}

impl TableAdapter {
    /// Build an adapter over a CSV file.
    pub fn from_csv(
        path: impl AsRef<Path>,
        profile: DatasetProfile,
        config: AdapterConfig,
    ) -> Result<Self, AdapterError> {
        let path = path.as_ref();
        let frame = read_frame(path)?;
        Self::build(frame, display_name(path), profile, config)
    }

    /// Build an adapter over an in-memory frame.
    pub fn from_frame(
        frame: TableFrame,
        profile: DatasetProfile,
        config: AdapterConfig,
    ) -> Result<Self, AdapterError> {
        Self::build(frame, "primary table".to_string(), profile, config)
    }

    fn build(
        mut frame: TableFrame,
        table_name: String,
        profile: DatasetProfile,
        config: AdapterConfig,
    ) -> Result<Self, AdapterError> {
        if !frame.has_column(&profile.id_column) {
            return Err(AdapterError::MissingColumn {
                table: table_name,
                column: profile.id_column.clone(),
            });
        }
        let filters = config.resolve(&profile);

        // Datasets that still carry relationships in foreign-key columns get
        // them lifted into edge rows before classification.
        if !profile.derived_edges.is_empty() {
            let derived =
                extract_foreign_key_edges(&mut frame, &profile.id_column, &profile.derived_edges);
            debug!("derived {} edge rows in {}", derived.len(), table_name);
            append_edge_rows(&mut frame, &derived);
        }

        let mut spec = SourceSpec::new(table_name.as_str(), profile.id_column.as_str())
            .with_label_column(profile.label_column.as_str());
        if let Some(label) = &profile.default_label {
            spec = spec.with_default_label(label.as_str());
        }
        let table = ClassifiedTable::classify(frame, &spec);
        log_distinct_values(&table, &table_name);

        let node_projection = resolve_projection(&table, &profile.catalog, &table_name);
        let edge_projection = resolve_projection(&table, &profile.edge_catalog, &table_name);
        Ok(Self {
            profile,
            filters,
            sources: vec![AdapterSource {
                table,
                node_projection,
                edge_projection,
            }],
        })
    }

    /// Attach the profile's secondary table from a CSV file.
    pub fn with_secondary_csv(self, path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let path = path.as_ref();
        let frame = read_frame(path)?;
        self.attach_secondary(frame, display_name(path))
    }

    /// Attach the profile's secondary table from an in-memory frame.
    pub fn with_secondary_frame(self, frame: TableFrame) -> Result<Self, AdapterError> {
        self.attach_secondary(frame, "secondary table".to_string())
    }

    fn attach_secondary(
        mut self,
        frame: TableFrame,
        table_name: String,
    ) -> Result<Self, AdapterError> {
        let Some(secondary) = self.profile.secondary.clone() else {
            return Err(AdapterError::NoSecondaryTable(self.profile.name.clone()));
        };
        if !frame.has_column(&secondary.key_column) {
            return Err(AdapterError::MissingColumn {
                table: table_name,
                column: secondary.key_column,
            });
        }
        let spec = SourceSpec::new(table_name.as_str(), secondary.key_column.as_str())
            .with_default_label(secondary.label.as_str());
        let table = ClassifiedTable::classify(frame, &spec);
        let node_projection = resolve_projection(&table, &secondary.catalog, &table_name);
        self.sources.push(AdapterSource {
            table,
            node_projection,
            edge_projection: ProjectionPlan::new(),
        });
        Ok(self)
    }

    /// Stream node records, primary table first, then the secondary one.
    pub fn produce_nodes(&self) -> impl Iterator<Item = NodeRecord> + '_ {
        self.sources.iter().flat_map(move |source| {
            source
                .table
                .nodes()
                .iter()
                .filter_map(move |row| self.node_record(source, row))
        })
    }

    /// Stream edge records in table order.
    pub fn produce_edges(&self) -> impl Iterator<Item = EdgeRecord> + '_ {
        self.sources.iter().flat_map(move |source| {
            source
                .table
                .edges()
                .iter()
                .filter_map(move |row| self.edge_record(source, row))
        })
    }

    /// The profile this adapter was built with.
    pub fn profile(&self) -> &DatasetProfile {
        &self.profile
    }

    fn node_record(&self, source: &AdapterSource, row: &NodeRow) -> Option<NodeRecord> {
        let label = match row.label.as_deref() {
            Some(label) if self.filters.node_types.contains(label) => label,
            Some(label) => {
                debug!("skipping node {:?}: label '{}' not allowed", row.id, label);
                return None;
            }
            None => {
                debug!("skipping unlabeled node {:?}", row.id);
                return None;
            }
        };
        let properties = project_properties(
            &source.table,
            &source.node_projection,
            row.row,
            label,
            &self.filters.node_fields,
        );
        Some(NodeRecord {
            id: row.id.clone(),
            label: label.to_string(),
            properties,
        })
    }

    fn edge_record(&self, source: &AdapterSource, row: &EdgeRow) -> Option<EdgeRecord> {
        if !self.filters.edge_types.contains(&row.edge_type) {
            debug!(
                "skipping edge {:?} -> {:?}: type '{}' not allowed",
                row.start, row.end, row.edge_type
            );
            return None;
        }
        let properties = project_properties(
            &source.table,
            &source.edge_projection,
            row.row,
            &row.edge_type,
            &self.filters.edge_fields,
        );
        Some(EdgeRecord {
            id: None,
            start: row.start.clone(),
            end: row.end.clone(),
            edge_type: row.edge_type.clone(),
            properties,
        })
    }
}

/// Project one row through the plan for `key`. A key without a plan entry
/// yields an empty bag; a field whose column is absent yields a null value;
/// a field outside the allow-set is omitted entirely.
fn project_properties(
    table: &ClassifiedTable,
    plan: &ProjectionPlan,
    row: usize,
    key: &str,
    allowed: &BTreeSet<String>,
) -> PropertyMap {
    let mut properties = PropertyMap::new();
    let Some(fields) = plan.get(key) else {
        return properties;
    };
    for field in fields {
        if !allowed.contains(&field.column) {
            continue;
        }
        let value = field
            .index
            .and_then(|idx| table.frame().cell(row, idx))
            .map(str::to_string);
        properties.insert(field.property.clone(), value);
    }
    properties
}

/// Resolve a catalog against the table's columns, warning once per missing
/// property column.
fn resolve_projection(
    table: &ClassifiedTable,
    catalog: &PropertyCatalog,
    table_name: &str,
) -> ProjectionPlan {
    let mut plan = ProjectionPlan::new();
    for mapping in catalog.mappings() {
        let fields = mapping
            .fields
            .iter()
            .map(|field| {
                let index = table.frame().column_index(&field.column);
                if index.is_none() {
                    warn!(
                        "property column '{}' missing from {}; '{}' will be null on {} records",
                        field.column, table_name, field.property, mapping.label
                    );
                }
                ProjectedField {
                    column: field.column.clone(),
                    property: field.property.clone(),
                    index,
                }
            })
            .collect();
        plan.insert(mapping.label.clone(), fields);
    }
    plan
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_distinct_values(table: &ClassifiedTable, table_name: &str) {
    let labels: BTreeSet<&str> = table
        .nodes()
        .iter()
        .filter_map(|n| n.label.as_deref())
        .collect();
    let edge_types: BTreeSet<&str> =
        table.edges().iter().map(|e| e.edge_type.as_str()).collect();
    debug!(
        "{}: distinct labels {:?}, distinct edge types {:?}",
        table_name, labels, edge_types
    );
}
