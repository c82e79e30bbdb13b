//! `massedit-grid` — Tabular store model for mass cell-edit operations.
//!
//! Pure model crate: cells, rows, named columns, and the per-cell
//! reconciliation state that mass-edit operations read and replace.
//! No CLI or IO dependencies.

pub mod cell;
pub mod filter;
pub mod recon;
pub mod table;

pub use cell::{Cell, CellValue};
pub use filter::{AllRows, EngineConfig, RowEngine};
pub use recon::{Judgment, JudgmentAction, Recon, ReconCandidate};
pub use table::{Column, ColumnModel, ColumnReconConfig, Row, Table};
