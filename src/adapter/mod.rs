//! Record adapters
//!
//! An adapter pairs one dataset profile with one loaded table and streams the
//! classified rows as typed node and edge records, applying allow-set
//! filtering and data-driven property projection along the way.

mod config;
mod mapping;
mod profile;
mod stream;
mod types;

pub use config::AdapterConfig;
pub use mapping::{FieldMapping, PropertyCatalog, PropertyMapping};
pub use profile::{DatasetProfile, SecondaryTable};
pub use stream::{AdapterError, TableAdapter};
pub use types::{EdgeRecord, NodeRecord, PropertyMap};
