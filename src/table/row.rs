//! Sentinel-row classification for the combined node+edge table
//!
//! The combined table encodes two record shapes in one sheet: a row with a
//! non-empty `_type` cell is an edge, every other row is a node. Rows are
//! classified once, up front, into typed variants so later stages never
//! re-inspect raw columns.

use super::frame::TableFrame;
use tracing::{debug, warn};

/// Node identifier column in the combined table.
pub const ID_COLUMN: &str = "_id";
/// Node label column in the combined table.
pub const LABEL_COLUMN: &str = "_labels";
/// Edge source-endpoint column in the combined table.
pub const START_COLUMN: &str = "_start";
/// Edge target-endpoint column in the combined table.
pub const END_COLUMN: &str = "_end";
/// Edge relationship-type column; non-empty marks the row as an edge.
pub const TYPE_COLUMN: &str = "_type";

/// Which columns carry identity and label for one table source.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    /// Name used in log messages (usually the file name).
    pub name: String,
    /// Column holding node identifiers.
    pub id_column: String,
    /// Column holding node labels.
    pub label_column: String,
    /// Label to use when a node row has none.
    pub default_label: Option<String>,
}

impl SourceSpec {
    /// Spec with the conventional `_labels` column and no default label.
    pub fn new(name: impl Into<String>, id_column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_column: id_column.into(),
            label_column: LABEL_COLUMN.to_string(),
            default_label: None,
        }
    }

    /// Use a different label column.
    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = column.into();
        self
    }

    /// Fall back to this label for node rows without one.
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = Some(label.into());
        self
    }
}

/// A row classified as a node: position plus extracted id and label.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    /// Row position in the owning frame.
    pub row: usize,
    pub id: Option<String>,
    pub label: Option<String>,
}

/// A row classified as an edge: position plus endpoints and relationship type.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    /// Row position in the owning frame.
    pub row: usize,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Always non-empty; surrounding whitespace is stripped.
    pub edge_type: String,
}

/// A frame whose rows have been partitioned into node and edge variants.
#[derive(Debug, Clone)]
pub struct ClassifiedTable {
    frame: TableFrame,
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
}

impl ClassifiedTable {
    /// Partition every row of `frame` by the `_type` sentinel.
    ///
    /// A missing `_type` column is tolerated: it is synthesized as all-null
    /// (every row a node) and a warning is logged. Endpoint and id cells are
    /// captured as-is; nothing here checks that references resolve.
    pub fn classify(mut frame: TableFrame, spec: &SourceSpec) -> Self {
        let type_idx = match frame.column_index(TYPE_COLUMN) {
            Some(idx) => idx,
            None => {
                warn!(
                    "'{}' column not found in {}; treating every row as a node",
                    TYPE_COLUMN, spec.name
                );
                frame.ensure_column(TYPE_COLUMN)
            }
        };
        let label_idx = frame.column_index(&spec.label_column);
        if label_idx.is_none() {
            match &spec.default_label {
                Some(label) => warn!(
                    "'{}' column not found in {}; assigning default label '{}'",
                    spec.label_column, spec.name, label
                ),
                None => warn!(
                    "'{}' column not found in {}; node rows will have no label",
                    spec.label_column, spec.name
                ),
            }
        }
        let id_idx = frame.column_index(&spec.id_column);
        let start_idx = frame.column_index(START_COLUMN);
        let end_idx = frame.column_index(END_COLUMN);

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for row in 0..frame.row_count() {
            let take = |idx: Option<usize>| {
                idx.and_then(|i| frame.cell(row, i)).map(str::to_string)
            };
            let marker = frame
                .cell(row, type_idx)
                .map(str::trim)
                .filter(|t| !t.is_empty());
            match marker {
                Some(edge_type) => edges.push(EdgeRow {
                    row,
                    start: take(start_idx),
                    end: take(end_idx),
                    edge_type: edge_type.to_string(),
                }),
                None => nodes.push(NodeRow {
                    row,
                    id: take(id_idx),
                    label: take(label_idx).or_else(|| spec.default_label.clone()),
                }),
            }
        }
        debug!(
            "{}: {} node rows, {} edge rows",
            spec.name,
            nodes.len(),
            edges.len()
        );
        Self {
            frame,
            nodes,
            edges,
        }
    }

    /// The underlying frame (with `_type` synthesized if it was missing).
    pub fn frame(&self) -> &TableFrame {
        &self.frame
    }

    /// Node rows in original table order.
    pub fn nodes(&self) -> &[NodeRow] {
        &self.nodes
    }

    /// Edge rows in original table order.
    pub fn edges(&self) -> &[EdgeRow] {
        &self.edges
    }
}
