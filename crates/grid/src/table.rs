use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// Column-level reconciliation configuration, snapshotted into change
/// metadata when a mass recon edit touches the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnReconConfig {
    pub identifier_space: String,
    pub schema_space: String,
}

/// A named column bound to a positional cell index within every row.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cell_index: usize,
    pub recon_config: Option<ColumnReconConfig>,
}

impl Column {
    pub fn new(name: &str, cell_index: usize) -> Self {
        Self {
            name: name.to_string(),
            cell_index,
            recon_config: None,
        }
    }
}

/// Ordered columns with name → column lookup. Lookup may fail (not found).
#[derive(Debug, Clone, Default)]
pub struct ColumnModel {
    columns: Vec<Column>,
}

impl ColumnModel {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Columns named left to right, cell index = position.
    pub fn from_names(names: &[&str]) -> Self {
        Self {
            columns: names
                .iter()
                .enumerate()
                .map(|(i, name)| Column::new(name, i))
                .collect(),
        }
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_by_name_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

/// An ordered sequence of cell slots. `None` = absent cell.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: Vec<Option<Arc<Cell>>>,
}

impl Row {
    pub fn new(cells: Vec<Option<Arc<Cell>>>) -> Self {
        Self { cells }
    }

    /// Reads past the stored width are absent, not errors (rows may be
    /// ragged relative to the column model).
    pub fn cell(&self, cell_index: usize) -> Option<&Arc<Cell>> {
        self.cells.get(cell_index).and_then(|slot| slot.as_ref())
    }
}

/// The tabular store: ordered rows under a column model.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: ColumnModel,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: ColumnModel, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row_index: usize) -> Option<&Row> {
        self.rows.get(row_index)
    }

    pub fn cell(&self, row_index: usize, cell_index: usize) -> Option<&Arc<Cell>> {
        self.rows.get(row_index).and_then(|row| row.cell(cell_index))
    }

    /// Replace one cell slot, growing a short row as needed. Writes outside
    /// the row range are ignored (the caller's diff was computed against
    /// this table, so a missing row means the diff is stale and is caught
    /// by the change-level precondition before any write happens).
    pub fn set_cell(&mut self, row_index: usize, cell_index: usize, cell: Option<Arc<Cell>>) {
        if let Some(row) = self.rows.get_mut(row_index) {
            if row.cells.len() <= cell_index {
                row.cells.resize(cell_index + 1, None);
            }
            row.cells[cell_index] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_by_name() {
        let model = ColumnModel::from_names(&["Name", "City"]);
        assert_eq!(model.column_by_name("City").unwrap().cell_index, 1);
        assert!(model.column_by_name("Country").is_none());
    }

    #[test]
    fn ragged_row_reads_as_absent() {
        let row = Row::new(vec![Some(Arc::new(Cell::text("a")))]);
        assert!(row.cell(0).is_some());
        assert!(row.cell(5).is_none());
    }

    #[test]
    fn set_cell_grows_short_row() {
        let mut table = Table::new(
            ColumnModel::from_names(&["A", "B", "C"]),
            vec![Row::default()],
        );
        table.set_cell(0, 2, Some(Arc::new(Cell::text("x"))));
        assert_eq!(table.cell(0, 2).unwrap().value.raw_display(), "x");
        assert!(table.cell(0, 0).is_none());
    }

    #[test]
    fn set_cell_out_of_range_row_is_noop() {
        let mut table = Table::default();
        table.set_cell(3, 0, Some(Arc::new(Cell::text("x"))));
        assert_eq!(table.row_count(), 0);
    }
}
