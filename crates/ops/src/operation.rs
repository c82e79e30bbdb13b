//! Operation descriptors.
//!
//! An operation is an immutable value object fully describing edit intent:
//! constructible from explicit parameters or reconstructed from a structured
//! payload, and serializable back to the structural inverse of that payload.
//! Applying one runs the visitor pass over the engine-selected rows and
//! packages the buffered diffs into a single reversible [`Change`].

use serde::{Deserialize, Serialize};

use massedit_grid::{EngineConfig, ReconCandidate, RowEngine, Table};

use crate::cancel::CancelFlag;
use crate::change::Change;
use crate::error::OpsError;
use crate::visitor::MatchSpecificVisitor;

/// Registry type tag for [`ReconMatchSpecificTopicOperation`].
pub const OP_RECON_MATCH_SPECIFIC_TOPIC: &str = "core/recon-match-specific-topic";

/// A serializable, appliable edit intent.
pub trait Operation: std::fmt::Debug + Send + Sync {
    /// Registry type tag this operation serializes under.
    fn op_tag(&self) -> &'static str;

    /// Description computable before applying, from configured values only.
    fn brief_description(&self) -> String;

    /// Structured payload; the inverse of the registered reconstruct
    /// function, round-trip equal on every field including the tag.
    fn serialize(&self) -> serde_json::Value;

    /// Run the visitor pass and package the diffs into one reversible
    /// change. Read-only over the table; the caller commits the result via
    /// [`Change::apply`] under the single-writer discipline.
    fn create_change(
        &self,
        table: &Table,
        engine: &dyn RowEngine,
        history_entry_id: u64,
        cancel: &CancelFlag,
    ) -> Result<Change, OpsError>;
}

/// Wire shape of the match-specific-topic payload (camelCase field names).
#[derive(Debug, Serialize, Deserialize)]
struct MatchSpecificTopicPayload {
    #[serde(default)]
    op: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "engineConfig")]
    engine_config: EngineConfig,
    #[serde(rename = "columnName")]
    column_name: String,
    #[serde(rename = "match")]
    matched: ReconCandidate,
    #[serde(rename = "identifierSpace")]
    identifier_space: String,
    #[serde(rename = "schemaSpace")]
    schema_space: String,
}

/// Assigns one fixed reconciliation match to all selected cells in a column.
#[derive(Debug, Clone)]
pub struct ReconMatchSpecificTopicOperation {
    engine_config: EngineConfig,
    column_name: String,
    matched: ReconCandidate,
    identifier_space: String,
    schema_space: String,
}

impl ReconMatchSpecificTopicOperation {
    pub fn new(
        engine_config: EngineConfig,
        column_name: &str,
        matched: ReconCandidate,
        identifier_space: &str,
        schema_space: &str,
    ) -> Self {
        Self {
            engine_config,
            column_name: column_name.to_string(),
            matched,
            identifier_space: identifier_space.to_string(),
            schema_space: schema_space.to_string(),
        }
    }

    /// Rebuild the descriptor from a structured payload. Any missing or
    /// wrong-shape required field fails with `MalformedOperation`; the
    /// `op` and `description` fields are informational on input.
    pub fn reconstruct(payload: &serde_json::Value) -> Result<Self, OpsError> {
        let payload: MatchSpecificTopicPayload = serde_json::from_value(payload.clone())
            .map_err(|e| OpsError::MalformedOperation(e.to_string()))?;
        if !payload.engine_config.0.is_object() {
            return Err(OpsError::MalformedOperation(
                "engineConfig must be an object".into(),
            ));
        }
        Ok(Self {
            engine_config: payload.engine_config,
            column_name: payload.column_name,
            matched: payload.matched,
            identifier_space: payload.identifier_space,
            schema_space: payload.schema_space,
        })
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine_config
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn matched(&self) -> &ReconCandidate {
        &self.matched
    }
}

impl Operation for ReconMatchSpecificTopicOperation {
    fn op_tag(&self) -> &'static str {
        OP_RECON_MATCH_SPECIFIC_TOPIC
    }

    fn brief_description(&self) -> String {
        format!(
            "Match specific topic {} ({}) to cells in column {}",
            self.matched.name, self.matched.id, self.column_name
        )
    }

    fn serialize(&self) -> serde_json::Value {
        let payload = MatchSpecificTopicPayload {
            op: self.op_tag().to_string(),
            description: self.brief_description(),
            engine_config: self.engine_config.clone(),
            column_name: self.column_name.clone(),
            matched: self.matched.clone(),
            identifier_space: self.identifier_space.clone(),
            schema_space: self.schema_space.clone(),
        };
        // The payload struct is plain data; serialization cannot fail.
        serde_json::to_value(payload).unwrap_or(serde_json::Value::Null)
    }

    fn create_change(
        &self,
        table: &Table,
        engine: &dyn RowEngine,
        history_entry_id: u64,
        cancel: &CancelFlag,
    ) -> Result<Change, OpsError> {
        let column = table
            .columns
            .column_by_name(&self.column_name)
            .ok_or_else(|| OpsError::ColumnNotFound(self.column_name.clone()))?;

        let mut visitor = MatchSpecificVisitor::new(
            column.cell_index,
            history_entry_id,
            &self.matched,
            &self.identifier_space,
            &self.schema_space,
        );

        for row_index in engine.select(table, &self.engine_config) {
            if cancel.is_cancelled() {
                return Err(OpsError::Cancelled);
            }
            if let Some(row) = table.row(row_index) {
                visitor.visit(row_index, row);
            }
        }

        let description = format!(
            "Match specific topic {} ({}) to {} cells in column {}",
            self.matched.name,
            self.matched.id,
            visitor.len(),
            column.name
        );
        Ok(Change::new(
            visitor.finish(),
            column.name.clone(),
            column.recon_config.clone(),
            description,
        ))
    }
}
