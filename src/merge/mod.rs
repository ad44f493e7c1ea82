//! Combined-table construction from per-entity CSV exports

mod merger;
mod plan;

pub use merger::{MergeError, MergeReport, Merger};
pub use plan::{EntitySource, ForeignKeyRule, MergePlan};

pub(crate) use merger::{append_edge_rows, extract_foreign_key_edges};
