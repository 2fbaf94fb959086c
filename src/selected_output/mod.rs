pub mod cell;
pub mod grid;
pub mod table;

pub use cell::{Cell, CellKind};
pub use grid::{OutOfRange, SelectedOutput};
pub use table::{render_headings, render_row, render_table, DEFAULT_DELIMITER};
