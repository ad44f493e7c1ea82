//! Allow-set configuration for adapters

use super::profile::DatasetProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional allow-lists restricting what an adapter emits.
///
/// Every field distinguishes "not configured" from "configured empty":
/// `None` admits everything the dataset profile knows about, while an
/// explicit list — including an empty one — is taken at face value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Node labels to emit; `None` means every known label.
    pub node_types: Option<Vec<String>>,
    /// Source columns allowed to feed node properties; `None` means every
    /// mapped column.
    pub node_fields: Option<Vec<String>>,
    /// Relationship types to emit; `None` means every known type.
    pub edge_types: Option<Vec<String>>,
    /// Source columns allowed to feed edge properties; `None` means every
    /// mapped column.
    pub edge_fields: Option<Vec<String>>,
}

impl AdapterConfig {
    /// Emit everything the profile knows about.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn with_node_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_node_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_edge_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_edge_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Turn the four optional lists into concrete sets by defaulting the
    /// unconfigured ones against the profile's known values.
    pub(crate) fn resolve(&self, profile: &DatasetProfile) -> ResolvedFilters {
        fn pick(explicit: &Option<Vec<String>>, known: BTreeSet<String>) -> BTreeSet<String> {
            match explicit {
                Some(values) => values.iter().cloned().collect(),
                None => known,
            }
        }
        ResolvedFilters {
            node_types: pick(&self.node_types, profile.known_node_types()),
            node_fields: pick(&self.node_fields, profile.known_node_fields()),
            edge_types: pick(&self.edge_types, profile.known_edge_types()),
            edge_fields: pick(&self.edge_fields, profile.known_edge_fields()),
        }
    }
}

/// Concrete allow-sets after defaulting against a profile.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedFilters {
    pub node_types: BTreeSet<String>,
    pub node_fields: BTreeSet<String>,
    pub edge_types: BTreeSet<String>,
    pub edge_fields: BTreeSet<String>,
}
