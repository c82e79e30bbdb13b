use std::sync::Arc;

use crate::recon::Recon;

/// Raw cell content. Slot absence is modeled by the row holding `None`,
/// so there is no empty variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if let Ok(num) = trimmed.parse::<f64>() {
            return CellValue::Number(num);
        }
        CellValue::Text(trimmed.to_string())
    }

    pub fn raw_display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{:.2}", n)
                }
            }
        }
    }
}

/// One cell: a value plus optional attached reconciliation state.
///
/// Cells are immutable once built. Replacing a cell means constructing a
/// new `Cell` and swapping the row slot's `Arc`; the old `Arc` lives on
/// inside any diff that captured it, which is what lets undo restore the
/// exact pre-edit object rather than a recomputation.
#[derive(Debug, Clone)]
pub struct Cell {
    pub value: CellValue,
    pub recon: Option<Arc<Recon>>,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self { value, recon: None }
    }

    pub fn with_recon(value: CellValue, recon: Arc<Recon>) -> Self {
        Self {
            value,
            recon: Some(recon),
        }
    }

    pub fn text(input: &str) -> Self {
        Self::new(CellValue::Text(input.to_string()))
    }
}
