//! `massedit-ops` — Mass cell-edit operations with undoable change capture.
//!
//! The reusable core: row visitation with dedup-by-identity, atomic diff
//! buffering, serializable operation descriptors, and changes that apply and
//! revert exactly. Row selection, the column schema store, and the
//! persistent history stack are external collaborators.
//!
//! Single-writer discipline: a table must not be mutated between an
//! operation's visitor pass and the [`Change::apply`] that commits it —
//! captured old cells must still be in place at apply time. The pass itself
//! is read-only and may run beside pure readers.

pub mod cancel;
pub mod change;
pub mod error;
pub mod operation;
pub mod registry;
pub mod visitor;

pub use cancel::CancelFlag;
pub use change::{CellChange, Change};
pub use error::OpsError;
pub use operation::{
    Operation, ReconMatchSpecificTopicOperation, OP_RECON_MATCH_SPECIFIC_TOPIC,
};
pub use registry::{OperationRegistry, ReconstructFn};
