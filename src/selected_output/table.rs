use super::cell::Cell;
use super::grid::SelectedOutput;

pub const DEFAULT_DELIMITER: &str = "\t";

pub fn render_headings(headings: &[String], delimiter: &str) -> String {
    let mut line = headings.join(delimiter);
    line.push('\n');
    line
}

/// Renders one data row padded with empty fields to `width` columns so every
/// line carries the header's column count.
pub fn render_row(cells: &[Cell], width: usize, delimiter: &str) -> String {
    let mut line = String::new();
    for column in 0..width.max(cells.len()) {
        if column > 0 {
            line.push_str(delimiter);
        }
        if let Some(cell) = cells.get(column) {
            line.push_str(&cell.to_string());
        }
    }
    line.push('\n');
    line
}

/// Renders the whole grid: header line first, then every committed row.
pub fn render_table(grid: &SelectedOutput, delimiter: &str) -> String {
    if grid.col_count() == 0 {
        return String::new();
    }
    let mut table = render_headings(grid.headings(), delimiter);
    for n in 0..grid.row_count() {
        if let Some(row) = grid.row(n) {
            table.push_str(&render_row(row, grid.col_count(), delimiter));
        }
    }
    table
}
