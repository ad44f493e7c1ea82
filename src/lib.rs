//! Trellis: tabular exports in, typed graph record streams out
//!
//! Turns heterogeneous entity CSVs into node and edge records a graph bulk
//! loader can ingest, via a sentinel-encoded combined table: a row with a
//! non-empty `_type` cell is an edge, every other row is a node.
//!
//! # Core Concepts
//!
//! - **Merger**: unions per-entity tables and lifts foreign-key columns into
//!   derived edge rows
//! - **Profiles**: per-dataset shape descriptions (id columns, labels,
//!   property mappings, edge types)
//! - **Adapters**: stream a classified table as filtered, projected records
//!
//! # Example
//!
//! ```
//! use trellis::{AdapterConfig, DatasetProfile, TableAdapter, TableFrame};
//!
//! let mut frame = TableFrame::new(vec![
//!     "_id".to_string(),
//!     "_labels".to_string(),
//!     "OrganName".to_string(),
//! ]);
//! frame.push_row(vec![
//!     Some("O1".to_string()),
//!     Some(":Organ".to_string()),
//!     Some("Liver".to_string()),
//! ]);
//!
//! let adapter = TableAdapter::from_frame(
//!     frame,
//!     DatasetProfile::case_study(),
//!     AdapterConfig::allow_all(),
//! )
//! .unwrap();
//! assert_eq!(adapter.produce_nodes().count(), 1);
//! ```

pub mod adapter;
pub mod merge;
pub mod table;
pub mod writer;

pub use adapter::{
    AdapterConfig, AdapterError, DatasetProfile, EdgeRecord, NodeRecord, PropertyCatalog,
    PropertyMap, SecondaryTable, TableAdapter,
};
pub use merge::{EntitySource, ForeignKeyRule, MergeError, MergePlan, MergeReport, Merger};
pub use table::{ClassifiedTable, SourceSpec, TableError, TableFrame};
pub use writer::{GraphWriter, JsonLinesWriter, WriterError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
