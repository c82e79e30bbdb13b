//! Type-tag → reconstruct-function table.
//!
//! An explicit table populated at startup, looked up by key at deserialize
//! time. A miss is fatal for that history entry only; independent entries
//! keep loading through the same registry.

use std::collections::HashMap;

use crate::error::OpsError;
use crate::operation::{
    Operation, ReconMatchSpecificTopicOperation, OP_RECON_MATCH_SPECIFIC_TOPIC,
};

pub type ReconstructFn = fn(&serde_json::Value) -> Result<Box<dyn Operation>, OpsError>;

pub struct OperationRegistry {
    table: HashMap<String, ReconstructFn>,
}

impl OperationRegistry {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Registry with every built-in operation registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(OP_RECON_MATCH_SPECIFIC_TOPIC, |payload| {
            ReconMatchSpecificTopicOperation::reconstruct(payload)
                .map(|op| Box::new(op) as Box<dyn Operation>)
        });
        registry
    }

    pub fn register(&mut self, tag: &str, reconstruct: ReconstructFn) {
        self.table.insert(tag.to_string(), reconstruct);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.table.contains_key(tag)
    }

    /// Rebuild an operation from its serialized payload, dispatching on the
    /// `op` tag.
    pub fn reconstruct(&self, payload: &serde_json::Value) -> Result<Box<dyn Operation>, OpsError> {
        let tag = payload
            .get("op")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                OpsError::MalformedOperation("missing or non-string 'op' field".into())
            })?;
        let reconstruct = self
            .table
            .get(tag)
            .ok_or_else(|| OpsError::UnknownOperationType(tag.to_string()))?;
        reconstruct(payload)
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
