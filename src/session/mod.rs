//! Caller-facing API: one engine, its routing state, and everything captured
//! from the most recent load or run.
//!
//! A session is synchronous. Each load or run resets diagnostics, the grid,
//! and the captured text buffers at its start, drives the engine to
//! completion or to a [`crate::Stop`], and returns the error count. Queries
//! are total: out-of-range indexes yield `""`, `0`, or [`Cell::Empty`].

mod run;

use crate::capture::Accumulator;
use crate::config::Settings;
use crate::engine::Engine;
use crate::router::{Router, StreamKind};
use crate::selected_output::{render_table, Cell};
use crate::shared::fs_atomic::atomic_write_file;
use crate::shared::CaptureError;
use std::io::Write;
use std::path::Path;

pub struct Session<E: Engine> {
    engine: E,
    router: Router,
    accumulator: Accumulator,
    components: Vec<String>,
    database_loaded: bool,
}

impl<E: Engine> Session<E> {
    pub fn new(engine: E) -> Self {
        Self::with_settings(engine, &Settings::default())
    }

    pub fn with_settings(engine: E, settings: &Settings) -> Self {
        Self {
            engine,
            router: Router::new(settings),
            accumulator: Accumulator::new(),
            components: Vec::new(),
            database_loaded: false,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn is_database_loaded(&self) -> bool {
        self.database_loaded
    }

    // Accumulated input

    pub fn accumulate_line(&mut self, line: &str) -> Result<(), CaptureError> {
        self.accumulator.append_line(line)
    }

    pub fn clear_accumulated_lines(&mut self) {
        self.accumulator.clear();
    }

    pub fn accumulated_lines(&self) -> &str {
        self.accumulator.get()
    }

    pub fn write_accumulated_lines(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writer.write_all(self.accumulator.get().as_bytes())
    }

    // Diagnostics

    pub fn add_error(&mut self, message: &str) -> Result<usize, CaptureError> {
        self.router.diagnostics_mut().errors.add(message)
    }

    pub fn add_warning(&mut self, message: &str) -> Result<usize, CaptureError> {
        self.router.diagnostics_mut().warnings.add(message)
    }

    pub fn error_count(&self) -> usize {
        self.router.diagnostics().errors.count()
    }

    pub fn error_string(&self) -> &str {
        self.router.diagnostics().errors.as_text()
    }

    pub fn error_string_line(&self, n: usize) -> &str {
        self.router.diagnostics().errors.line_at(n)
    }

    pub fn error_string_line_count(&self) -> usize {
        self.router.diagnostics().errors.line_count()
    }

    pub fn write_error_string(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        self.router.diagnostics().errors.write_to(writer)
    }

    pub fn warning_count(&self) -> usize {
        self.router.diagnostics().warnings.count()
    }

    pub fn warning_string(&self) -> &str {
        self.router.diagnostics().warnings.as_text()
    }

    pub fn warning_string_line(&self, n: usize) -> &str {
        self.router.diagnostics().warnings.line_at(n)
    }

    pub fn warning_string_line_count(&self) -> usize {
        self.router.diagnostics().warnings.line_count()
    }

    pub fn write_warning_string(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        self.router.diagnostics().warnings.write_to(writer)
    }

    // Captured text streams

    pub fn dump_string(&self) -> &str {
        self.captured_text(StreamKind::Dump)
    }

    pub fn dump_string_line(&self, n: usize) -> &str {
        self.captured_line(StreamKind::Dump, n)
    }

    pub fn dump_string_line_count(&self) -> usize {
        self.captured_line_count(StreamKind::Dump)
    }

    pub fn output_string(&self) -> &str {
        self.captured_text(StreamKind::Output)
    }

    pub fn output_string_line(&self, n: usize) -> &str {
        self.captured_line(StreamKind::Output, n)
    }

    pub fn output_string_line_count(&self) -> usize {
        self.captured_line_count(StreamKind::Output)
    }

    pub fn log_string(&self) -> &str {
        self.captured_text(StreamKind::Log)
    }

    pub fn log_string_line(&self, n: usize) -> &str {
        self.captured_line(StreamKind::Log, n)
    }

    pub fn log_string_line_count(&self) -> usize {
        self.captured_line_count(StreamKind::Log)
    }

    fn captured_text(&self, kind: StreamKind) -> &str {
        self.router
            .buffer(kind)
            .map(|buffer| buffer.as_text())
            .unwrap_or("")
    }

    fn captured_line(&self, kind: StreamKind, n: usize) -> &str {
        self.router
            .buffer(kind)
            .map(|buffer| buffer.line_at(n))
            .unwrap_or("")
    }

    fn captured_line_count(&self, kind: StreamKind) -> usize {
        self.router
            .buffer(kind)
            .map(|buffer| buffer.line_count())
            .unwrap_or(0)
    }

    // Selected output

    /// Rows including the header row; 0 while no column exists.
    pub fn selected_output_row_count(&self) -> usize {
        let grid = self.router.grid();
        if grid.col_count() == 0 {
            0
        } else {
            grid.row_count() + 1
        }
    }

    pub fn selected_output_column_count(&self) -> usize {
        self.router.grid().col_count()
    }

    /// Row 0 holds the headings as [`Cell::Text`].
    pub fn selected_output_value(&self, row: usize, col: usize) -> Cell {
        self.router.grid().value(row, col)
    }

    /// Writes the grid as a delimited table, replacing `path` atomically.
    pub fn export_selected_output(&self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        let path = path.as_ref();
        let table = render_table(self.router.grid(), self.router.delimiter());
        atomic_write_file(path, table.as_bytes()).map_err(|source| CaptureError::Export {
            path: path.display().to_string(),
            source,
        })
    }

    // Components

    pub fn list_components(&self) -> &[String] {
        &self.components
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, n: usize) -> &str {
        self.components.get(n).map(String::as_str).unwrap_or("")
    }

    // Routing switches

    pub fn file_on(&self, kind: StreamKind) -> bool {
        self.router.switches().file_on(kind)
    }

    pub fn set_file_on(&mut self, kind: StreamKind, on: bool) {
        self.router.switches_mut().set_file_on(kind, on);
    }

    pub fn output_file_on(&self) -> bool {
        self.file_on(StreamKind::Output)
    }

    pub fn set_output_file_on(&mut self, on: bool) {
        self.set_file_on(StreamKind::Output, on);
    }

    pub fn log_file_on(&self) -> bool {
        self.file_on(StreamKind::Log)
    }

    pub fn set_log_file_on(&mut self, on: bool) {
        self.set_file_on(StreamKind::Log, on);
    }

    pub fn error_file_on(&self) -> bool {
        self.file_on(StreamKind::Error)
    }

    /// Errors and warnings share this switch.
    pub fn set_error_file_on(&mut self, on: bool) {
        self.set_file_on(StreamKind::Error, on);
        self.set_file_on(StreamKind::Warning, on);
    }

    pub fn dump_file_on(&self) -> bool {
        self.file_on(StreamKind::Dump)
    }

    pub fn set_dump_file_on(&mut self, on: bool) {
        self.set_file_on(StreamKind::Dump, on);
    }

    pub fn selected_output_file_on(&self) -> bool {
        self.file_on(StreamKind::Punch)
    }

    pub fn set_selected_output_file_on(&mut self, on: bool) {
        self.set_file_on(StreamKind::Punch, on);
    }

    pub fn dump_string_on(&self) -> bool {
        self.router.switches().capture_on(StreamKind::Dump)
    }

    pub fn set_dump_string_on(&mut self, on: bool) {
        self.router
            .switches_mut()
            .set_capture_on(StreamKind::Dump, on);
    }

    pub fn output_string_on(&self) -> bool {
        self.router.switches().capture_on(StreamKind::Output)
    }

    pub fn set_output_string_on(&mut self, on: bool) {
        self.router
            .switches_mut()
            .set_capture_on(StreamKind::Output, on);
    }

    pub fn log_string_on(&self) -> bool {
        self.router.switches().capture_on(StreamKind::Log)
    }

    pub fn set_log_string_on(&mut self, on: bool) {
        self.router.switches_mut().set_capture_on(StreamKind::Log, on);
    }
}
