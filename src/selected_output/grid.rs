use super::cell::Cell;
use crate::shared::errors::{reserve_items, CaptureError};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OutOfRange {
    #[error("selected-output row is out of range")]
    Row,
    #[error("selected-output column is out of range")]
    Column,
}

/// Typed selected-output table with an incrementally grown header.
///
/// Row 0 is the header; committed data rows are addressed from 1. A column
/// introduced after some rows were committed reads back as [`Cell::Empty`]
/// in those earlier rows.
#[derive(Debug, Default, Clone)]
pub struct SelectedOutput {
    headings: Vec<String>,
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
    staged: Vec<Cell>,
    cursor: usize,
}

impl SelectedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `value` under `name`. Labels are taken verbatim; an unseen
    /// label becomes a new trailing column.
    pub fn add_cell(&mut self, name: &str, value: Cell) -> Result<(), CaptureError> {
        let column = match self.columns.get(name) {
            Some(column) => *column,
            None => self.headings.len(),
        };
        let width = self.staged.len().max(column + 1);
        let additional = width - self.staged.len();
        reserve_items(&mut self.staged, additional, "selected-output row")?;
        if column == self.headings.len() {
            reserve_items(&mut self.headings, 1, "selected-output headings")?;
            self.columns
                .try_reserve(1)
                .map_err(|_| CaptureError::out_of_memory("selected-output headings"))?;
            self.headings.push(name.to_string());
            self.columns.insert(name.to_string(), column);
        }

        self.staged.resize(width, Cell::Empty);
        self.staged[column] = value;
        self.cursor = column + 1;
        Ok(())
    }

    /// Commits the staged cells as a new row. With nothing staged this is a
    /// no-op and no empty row is produced.
    pub fn begin_row(&mut self) -> Result<(), CaptureError> {
        if self.staged.is_empty() {
            self.cursor = 0;
            return Ok(());
        }
        reserve_items(&mut self.rows, 1, "selected-output rows")?;
        self.rows.push(std::mem::take(&mut self.staged));
        self.cursor = 0;
        Ok(())
    }

    /// Drops a row that was staged but never committed.
    pub fn discard_staged(&mut self) {
        self.staged.clear();
        self.cursor = 0;
    }

    pub fn has_staged(&self) -> bool {
        !self.staged.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of committed data rows; the header row is not counted.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.headings.len()
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    /// Returns committed data row `n` (zero-based, header excluded).
    pub fn row(&self, n: usize) -> Option<&[Cell]> {
        self.rows.get(n).map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, OutOfRange> {
        if row > self.rows.len() {
            return Err(OutOfRange::Row);
        }
        if col >= self.headings.len() {
            return Err(OutOfRange::Column);
        }
        if row == 0 {
            return Ok(Cell::Text(self.headings[col].clone()));
        }
        Ok(self.rows[row - 1].get(col).cloned().unwrap_or_default())
    }

    /// Like [`SelectedOutput::get`] but collapses out-of-range to `Empty`.
    pub fn value(&self, row: usize, col: usize) -> Cell {
        self.get(row, col).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.headings.clear();
        self.columns.clear();
        self.rows.clear();
        self.discard_staged();
    }
}
