//! Row-selection collaborator interface.
//!
//! The mass-edit engine treats row filtering as an external concern: it
//! hands the opaque config to a [`RowEngine`] and visits whatever indices
//! come back. Ordering and skip logic live entirely on that side of the
//! boundary.

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Opaque filter configuration, carried through operation payloads
/// untouched and handed to the row engine as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineConfig(pub serde_json::Value);

impl EngineConfig {
    /// Config that filters nothing.
    pub fn neutral() -> Self {
        Self(serde_json::json!({}))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Turns a filter configuration into the set of row indices to visit.
///
/// Contract: indices are ascending and duplicate-free, and every index is
/// valid for `table` at selection time.
pub trait RowEngine {
    fn select(&self, table: &Table, config: &EngineConfig) -> Vec<usize>;
}

/// Selects every row. Default engine when no facets are active.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRows;

impl RowEngine for AllRows {
    fn select(&self, table: &Table, _config: &EngineConfig) -> Vec<usize> {
        (0..table.row_count()).collect()
    }
}
