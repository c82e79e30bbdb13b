//! Visitor pass with dedup-by-identity.
//!
//! One visitor is constructed fresh per apply call and lives exactly one
//! pass: immutable configuration plus a dedup map keyed by the identity of
//! each cell's *original* recon. Cells sharing one prior recon instance are
//! merged into one derived recon and counted together; value-equal but
//! distinct recons stay distinct groups. The pass never touches the store —
//! it buffers a fully ordered diff list that [`crate::change::Change`]
//! commits later.

use std::collections::HashMap;
use std::sync::Arc;

use massedit_grid::{Cell, Judgment, JudgmentAction, Recon, ReconCandidate, Row};

use crate::change::CellChange;

/// Dedup key: address of the original recon, 0 = no recon attached.
fn recon_key(cell: &Cell) -> usize {
    cell.recon
        .as_ref()
        .map(|r| Arc::as_ptr(r) as usize)
        .unwrap_or(0)
}

/// Pass-scoped visitor assigning one fixed candidate to every visited cell.
pub struct MatchSpecificVisitor<'op> {
    cell_index: usize,
    history_entry_id: u64,
    candidate: &'op ReconCandidate,
    identifier_space: &'op str,
    schema_space: &'op str,
    /// Original-recon identity → slot in `group_recons`.
    dup_recon_map: HashMap<usize, usize>,
    /// One derived recon per identity group; batch size counted here while
    /// the recon is still exclusively owned, shared via `Arc` only at
    /// finish time.
    group_recons: Vec<Recon>,
    /// (row, old cell, group slot) in visitation order.
    pending: Vec<(usize, Arc<Cell>, usize)>,
}

impl<'op> MatchSpecificVisitor<'op> {
    pub fn new(
        cell_index: usize,
        history_entry_id: u64,
        candidate: &'op ReconCandidate,
        identifier_space: &'op str,
        schema_space: &'op str,
    ) -> Self {
        Self {
            cell_index,
            history_entry_id,
            candidate,
            identifier_space,
            schema_space,
            dup_recon_map: HashMap::new(),
            group_recons: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Visit one row. Absent target cell = no diff.
    pub fn visit(&mut self, row_index: usize, row: &Row) {
        let Some(cell) = row.cell(self.cell_index) else {
            return;
        };

        let key = recon_key(cell);
        let slot = match self.dup_recon_map.get(&key) {
            Some(&slot) => {
                self.group_recons[slot].judgment_batch_size += 1;
                slot
            }
            None => {
                let mut recon = match &cell.recon {
                    Some(old) => old.derive(self.history_entry_id),
                    None => Recon::new(
                        self.history_entry_id,
                        self.identifier_space,
                        self.schema_space,
                    ),
                };
                recon.judgment = Judgment::Matched;
                recon.matched = Some(self.candidate.clone());
                recon.match_rank = -1;
                recon.judgment_action = JudgmentAction::Mass;
                recon.judgment_batch_size = 1;

                let slot = self.group_recons.len();
                self.group_recons.push(recon);
                self.dup_recon_map.insert(key, slot);
                slot
            }
        };

        self.pending.push((row_index, Arc::clone(cell), slot));
    }

    /// Number of diffs buffered so far.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Materialize the ordered diff list. Each identity group's recon is
    /// wrapped in a single `Arc`, so every cell of the group references the
    /// same instance and its batch size equals the group population.
    pub fn finish(self) -> Vec<CellChange> {
        let shared: Vec<Arc<Recon>> = self.group_recons.into_iter().map(Arc::new).collect();
        let cell_index = self.cell_index;

        self.pending
            .into_iter()
            .map(|(row_index, old, slot)| {
                let new = Arc::new(Cell::with_recon(
                    old.value.clone(),
                    Arc::clone(&shared[slot]),
                ));
                CellChange::new(row_index, cell_index, Some(old), Some(new))
            })
            .collect()
    }
}
