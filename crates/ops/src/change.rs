//! Reversible change aggregates.
//!
//! A [`Change`] is the unit of undo/redo: an ordered list of per-cell diffs
//! plus metadata, applied and reverted atomically. Old cells are captured by
//! `Arc`, so revert restores the exact pre-edit objects rather than
//! recomputing equal-looking ones.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use massedit_grid::{Cell, ColumnReconConfig, Table};

use crate::error::OpsError;

/// Atomic diff unit: one cell slot, before and after.
#[derive(Debug, Clone)]
pub struct CellChange {
    pub row: usize,
    pub cell_index: usize,
    pub old: Option<Arc<Cell>>,
    pub new: Option<Arc<Cell>>,
}

impl CellChange {
    pub fn new(
        row: usize,
        cell_index: usize,
        old: Option<Arc<Cell>>,
        new: Option<Arc<Cell>>,
    ) -> Self {
        Self {
            row,
            cell_index,
            old,
            new,
        }
    }
}

/// Two slots hold the same cell: same `Arc`, or both absent.
fn same_cell(a: Option<&Arc<Cell>>, b: Option<&Arc<Cell>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Ordered, reversible aggregate of cell diffs plus metadata.
///
/// Created once per operation application, then applied exactly once and
/// possibly reverted/re-applied many times by the history layer. Apply and
/// revert are all-or-nothing: every precondition is verified before the
/// first write, so a stale store is never left half-mutated.
#[derive(Debug, Clone)]
pub struct Change {
    cell_changes: Vec<CellChange>,
    column_name: String,
    recon_config: Option<ColumnReconConfig>,
    description: String,
    created_at: DateTime<Utc>,
}

impl Change {
    pub fn new(
        cell_changes: Vec<CellChange>,
        column_name: String,
        recon_config: Option<ColumnReconConfig>,
        description: String,
    ) -> Self {
        Self {
            cell_changes,
            column_name,
            recon_config,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn cell_changes(&self) -> &[CellChange] {
        &self.cell_changes
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Column-level reconciliation configuration at capture time.
    pub fn recon_config(&self) -> Option<&ColumnReconConfig> {
        self.recon_config.as_ref()
    }

    /// Detailed description, including the affected-cell count.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Commit every diff to the store, new cells in.
    ///
    /// Precondition: each slot still holds the recorded old cell. On any
    /// mismatch nothing is written and `StaleState` names the first
    /// offending slot.
    pub fn apply(&self, table: &mut Table) -> Result<(), OpsError> {
        for cc in &self.cell_changes {
            if !same_cell(table.cell(cc.row, cc.cell_index), cc.old.as_ref()) {
                return Err(OpsError::StaleState {
                    row: cc.row,
                    cell_index: cc.cell_index,
                });
            }
        }
        for cc in &self.cell_changes {
            table.set_cell(cc.row, cc.cell_index, cc.new.clone());
        }
        Ok(())
    }

    /// Exact inverse of [`Change::apply`]: writes back the captured old
    /// cells, same `Arc`s, not recomputations. Precondition: each slot
    /// still holds the recorded new cell.
    pub fn revert(&self, table: &mut Table) -> Result<(), OpsError> {
        for cc in &self.cell_changes {
            if !same_cell(table.cell(cc.row, cc.cell_index), cc.new.as_ref()) {
                return Err(OpsError::StaleState {
                    row: cc.row,
                    cell_index: cc.cell_index,
                });
            }
        }
        for cc in &self.cell_changes {
            table.set_cell(cc.row, cc.cell_index, cc.old.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use massedit_grid::{Cell, ColumnModel, Row};

    fn one_row_table(cell: Option<Arc<Cell>>) -> Table {
        Table::new(ColumnModel::from_names(&["A"]), vec![Row::new(vec![cell])])
    }

    #[test]
    fn apply_then_revert_restores_same_arc() {
        let old = Arc::new(Cell::text("before"));
        let new = Arc::new(Cell::text("after"));
        let mut table = one_row_table(Some(Arc::clone(&old)));

        let change = Change::new(
            vec![CellChange::new(
                0,
                0,
                Some(Arc::clone(&old)),
                Some(Arc::clone(&new)),
            )],
            "A".into(),
            None,
            "Edit 1 cells in column A".into(),
        );

        change.apply(&mut table).unwrap();
        assert!(Arc::ptr_eq(table.cell(0, 0).unwrap(), &new));

        change.revert(&mut table).unwrap();
        assert!(Arc::ptr_eq(table.cell(0, 0).unwrap(), &old));
    }

    #[test]
    fn apply_rejects_stale_store_without_writing() {
        let captured = Arc::new(Cell::text("captured"));
        let drifted = Arc::new(Cell::text("captured"));
        // Value-equal but a different object: still stale.
        let mut table = one_row_table(Some(Arc::clone(&drifted)));

        let change = Change::new(
            vec![CellChange::new(
                0,
                0,
                Some(captured),
                Some(Arc::new(Cell::text("after"))),
            )],
            "A".into(),
            None,
            "Edit 1 cells in column A".into(),
        );

        let err = change.apply(&mut table).unwrap_err();
        assert!(matches!(err, OpsError::StaleState { row: 0, cell_index: 0 }));
        assert!(Arc::ptr_eq(table.cell(0, 0).unwrap(), &drifted));
    }

    #[test]
    fn apply_is_all_or_nothing_across_diffs() {
        let old_0 = Arc::new(Cell::text("r0"));
        let old_1 = Arc::new(Cell::text("r1"));
        let mut table = Table::new(
            ColumnModel::from_names(&["A"]),
            vec![
                Row::new(vec![Some(Arc::clone(&old_0))]),
                Row::new(vec![Some(Arc::clone(&old_1))]),
            ],
        );

        // Second diff is stale: it claims row 1 holds a different object.
        let change = Change::new(
            vec![
                CellChange::new(
                    0,
                    0,
                    Some(Arc::clone(&old_0)),
                    Some(Arc::new(Cell::text("new0"))),
                ),
                CellChange::new(
                    1,
                    0,
                    Some(Arc::new(Cell::text("r1"))),
                    Some(Arc::new(Cell::text("new1"))),
                ),
            ],
            "A".into(),
            None,
            "Edit 2 cells in column A".into(),
        );

        assert!(change.apply(&mut table).is_err());
        // Row 0 must not have been touched even though its own precondition held.
        assert!(Arc::ptr_eq(table.cell(0, 0).unwrap(), &old_0));
        assert!(Arc::ptr_eq(table.cell(1, 0).unwrap(), &old_1));
    }

    #[test]
    fn none_slot_matches_none_precondition() {
        let mut table = one_row_table(None);
        let new = Arc::new(Cell::text("filled"));

        let change = Change::new(
            vec![CellChange::new(0, 0, None, Some(Arc::clone(&new)))],
            "A".into(),
            None,
            "Edit 1 cells in column A".into(),
        );

        change.apply(&mut table).unwrap();
        assert!(Arc::ptr_eq(table.cell(0, 0).unwrap(), &new));
        change.revert(&mut table).unwrap();
        assert!(table.cell(0, 0).is_none());
    }
}
