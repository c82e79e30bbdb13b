use std::fmt;

#[derive(Debug)]
pub enum OpsError {
    /// Named target column absent; raised before any row is visited.
    ColumnNotFound(String),
    /// Operation payload missing or malformed required field.
    MalformedOperation(String),
    /// Registry miss during deserialization; fatal for that entry only.
    UnknownOperationType(String),
    /// Apply/revert precondition failed: the store no longer holds the
    /// cell the diff was computed against. The store is left unmodified.
    StaleState { row: usize, cell_index: usize },
    /// Cooperative cancellation observed between row visits.
    Cancelled,
}

impl fmt::Display for OpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound(name) => write!(f, "column not found: {name}"),
            Self::MalformedOperation(msg) => write!(f, "malformed operation payload: {msg}"),
            Self::UnknownOperationType(tag) => write!(f, "unknown operation type: {tag}"),
            Self::StaleState { row, cell_index } => {
                write!(
                    f,
                    "stale state at row {row}, cell {cell_index}: store changed since the diff was computed"
                )
            }
            Self::Cancelled => write!(f, "operation cancelled, no change applied"),
        }
    }
}

impl std::error::Error for OpsError {}
