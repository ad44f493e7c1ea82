//! In-memory column-ordered table with nullable string cells
//!
//! The frame is the working representation for every CSV this crate touches:
//! per-entity exports, the combined node+edge table, and auxiliary tables.
//! Cells are `Option<String>` so that "empty in the CSV" and "column absent"
//! both surface as `None` to downstream code.

use std::cmp::Ordering;
use std::collections::HashMap;

/// A single table cell; `None` means the value was empty or never present.
pub type Cell = Option<String>;

/// A rectangular table: ordered header row plus row-major nullable cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableFrame {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl TableFrame {
    /// Create an empty frame with the given column order.
    pub fn new(columns: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            // First occurrence wins if a header repeats
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            columns,
            index,
            rows: Vec::new(),
        }
    }

    /// Create a frame with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in insertion order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the frame holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a cell; `None` for a null cell or an out-of-range position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Look up a cell by column name.
    pub fn cell_by_name(&self, row: usize, column: &str) -> Option<&str> {
        self.cell(row, self.column_index(column)?)
    }

    /// Overwrite one cell.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Cell) {
        if let Some(cells) = self.rows.get_mut(row) {
            if let Some(slot) = cells.get_mut(col) {
                *slot = value;
            }
        }
    }

    /// Append a row, padding or truncating to the current column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Add a column filled with nulls if it is missing; returns its position.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        let idx = self.columns.len();
        self.columns.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        for row in &mut self.rows {
            row.push(None);
        }
        idx
    }

    /// Append another frame's rows beneath this one, outer-joining on column
    /// names. Columns unique to `other` are added (nulls for existing rows);
    /// columns `other` lacks stay null in the appended rows.
    pub fn outer_union(&mut self, other: &TableFrame) {
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|name| self.ensure_column(name))
            .collect();
        let width = self.columns.len();
        for row in &other.rows {
            let mut cells = vec![None; width];
            for (j, cell) in row.iter().enumerate() {
                cells[mapping[j]] = cell.clone();
            }
            self.rows.push(cells);
        }
    }

    /// Stable sort of rows by the named key columns, ascending, nulls first.
    /// A key column that does not exist compares equal for every row.
    pub fn sort_rows(&mut self, key_columns: &[&str]) {
        let indices: Vec<Option<usize>> = key_columns
            .iter()
            .map(|name| self.column_index(name))
            .collect();
        self.rows.sort_by(|a, b| {
            for idx in indices.iter().flatten() {
                let left = a.get(*idx).and_then(|c| c.as_deref());
                let right = b.get(*idx).and_then(|c| c.as_deref());
                // Option orders None before Some, which is exactly nulls-first
                match left.cmp(&right) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            Ordering::Equal
        });
    }
}
