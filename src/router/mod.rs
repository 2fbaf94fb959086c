pub mod sinks;
pub mod stream;
pub mod switches;

pub use sinks::FileSinks;
pub use stream::{Action, StreamKind};
pub use switches::Switches;

use crate::capture::{Diagnostics, LineBuffer};
use crate::config::Settings;
use crate::selected_output::{render_headings, render_row, Cell, SelectedOutput};
use crate::shared::logging::append_session_event;
use crate::shared::CaptureError;
use crate::stop::Stop;
use serde_json::Value;
use std::path::PathBuf;

/// A text emission after format expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub stream: StreamKind,
    pub text: String,
    pub fatal: bool,
}

/// Single fan-out point for everything the engine emits.
///
/// Writes go to the kind's file sink and/or its in-memory structure according
/// to [`Switches`]; neither depends on a run being active.
#[derive(Debug)]
pub struct Router {
    switches: Switches,
    sinks: FileSinks,
    diagnostics: Diagnostics,
    output: LineBuffer,
    log: LineBuffer,
    screen: LineBuffer,
    dump: LineBuffer,
    grid: SelectedOutput,
    delimiter: String,
    punch_header_width: usize,
    stop_counted: bool,
    event_log: Option<PathBuf>,
}

impl Router {
    pub fn new(settings: &Settings) -> Self {
        Self {
            switches: Switches::from_settings(&settings.switches),
            sinks: FileSinks::new(settings),
            diagnostics: Diagnostics::new(),
            output: LineBuffer::new(),
            log: LineBuffer::new(),
            screen: LineBuffer::new(),
            dump: LineBuffer::new(),
            grid: SelectedOutput::new(),
            delimiter: settings.delimiter.clone(),
            punch_header_width: 0,
            stop_counted: false,
            event_log: settings.event_log.clone(),
        }
    }

    /// The engine's single dispatch entry point.
    ///
    /// Returns `true` for accepted writes, the open state for
    /// [`Action::QueryIsOpen`], and whether the sink is usable for
    /// [`Action::OpenSink`].
    pub fn dispatch(&mut self, action: Action) -> Result<bool, Stop> {
        match action {
            Action::Write {
                stream,
                text,
                fatal,
            } => {
                self.route(Emission {
                    stream,
                    text,
                    fatal,
                })?;
                Ok(true)
            }
            Action::Punch { name, value } => {
                self.punch(&name, value)?;
                Ok(true)
            }
            Action::EndRow => {
                self.end_row()?;
                Ok(true)
            }
            Action::OpenSink { stream, path } => Ok(self.open_sink(stream, path)),
            Action::CloseSink { stream } => {
                self.close_sink(stream);
                Ok(true)
            }
            Action::QueryIsOpen { stream } => Ok(self.sinks.is_open(stream)),
        }
    }

    pub fn route(&mut self, emission: Emission) -> Result<(), Stop> {
        let Emission {
            stream,
            text,
            fatal,
        } = emission;

        match stream {
            StreamKind::Error | StreamKind::Warning => {
                let message = text.strip_suffix('\n').unwrap_or(&text);
                if self.switches.file_on(stream) {
                    self.write_file(stream, &format!("{message}\n"))?;
                }
                let reporter = if stream == StreamKind::Error {
                    &mut self.diagnostics.errors
                } else {
                    &mut self.diagnostics.warnings
                };
                reporter.add(message)?;
            }
            StreamKind::Punch => {
                if self.switches.file_on(stream) {
                    self.write_file(stream, &text)?;
                }
            }
            StreamKind::Output | StreamKind::Log | StreamKind::Screen | StreamKind::Dump => {
                if self.switches.file_on(stream) {
                    self.write_file(stream, &text)?;
                }
                if self.switches.capture_on(stream) {
                    if let Some(buffer) = self.buffer_mut(stream) {
                        buffer.append(&text)?;
                    }
                }
            }
        }

        if fatal {
            self.stop_counted = stream == StreamKind::Error;
            return Err(Stop::fatal(stream, text));
        }
        Ok(())
    }

    pub fn punch(&mut self, name: &str, value: Cell) -> Result<(), Stop> {
        self.grid.add_cell(name, value)?;
        Ok(())
    }

    /// Commits the staged selected-output row and mirrors it to the
    /// selected-output sink when that switch is on.
    pub fn end_row(&mut self) -> Result<(), Stop> {
        if !self.grid.has_staged() {
            return Ok(());
        }
        self.grid.begin_row()?;
        if self.switches.file_on(StreamKind::Punch) {
            self.write_last_row()?;
        }
        Ok(())
    }

    pub fn open_sink(&mut self, stream: StreamKind, path: PathBuf) -> bool {
        if self.sinks.path(stream) != path.as_path() {
            if stream == StreamKind::Punch {
                self.punch_header_width = 0;
            }
            self.sinks.set_path(stream, path);
        }
        if !self.switches.file_on(stream) {
            return true;
        }
        match self.sinks.ensure_open(stream) {
            Ok(opened) => {
                if opened {
                    self.log_sink_opened(stream);
                }
                true
            }
            Err(err) => {
                self.log_sink_failure(stream, &err);
                false
            }
        }
    }

    pub fn close_sink(&mut self, stream: StreamKind) {
        if stream == StreamKind::Punch {
            self.punch_header_width = 0;
        }
        self.sinks.close(stream);
    }

    pub fn close_all_sinks(&mut self) {
        self.punch_header_width = 0;
        self.sinks.close_all();
    }

    /// Clears everything that reflects "the most recent run".
    pub fn begin_cycle(&mut self) {
        self.diagnostics.reset();
        self.stop_counted = false;
        self.grid.clear();
        self.output.clear();
        self.log.clear();
        self.screen.clear();
        self.dump.clear();
    }

    /// Whether the last fatal emission was already added as an error.
    /// Reading the flag clears it.
    pub(crate) fn take_stop_counted(&mut self) -> bool {
        std::mem::take(&mut self.stop_counted)
    }

    pub fn switches(&self) -> &Switches {
        &self.switches
    }

    pub fn switches_mut(&mut self) -> &mut Switches {
        &mut self.switches
    }

    pub fn sinks(&self) -> &FileSinks {
        &self.sinks
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn grid(&self) -> &SelectedOutput {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SelectedOutput {
        &mut self.grid
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn event_log(&self) -> Option<&std::path::Path> {
        self.event_log.as_deref()
    }

    /// In-memory buffer for a text stream kind; `None` for error, warning,
    /// and punch, which have structured destinations.
    pub fn buffer(&self, stream: StreamKind) -> Option<&LineBuffer> {
        match stream {
            StreamKind::Output => Some(&self.output),
            StreamKind::Log => Some(&self.log),
            StreamKind::Screen => Some(&self.screen),
            StreamKind::Dump => Some(&self.dump),
            StreamKind::Error | StreamKind::Warning | StreamKind::Punch => None,
        }
    }

    fn buffer_mut(&mut self, stream: StreamKind) -> Option<&mut LineBuffer> {
        match stream {
            StreamKind::Output => Some(&mut self.output),
            StreamKind::Log => Some(&mut self.log),
            StreamKind::Screen => Some(&mut self.screen),
            StreamKind::Dump => Some(&mut self.dump),
            StreamKind::Error | StreamKind::Warning | StreamKind::Punch => None,
        }
    }

    fn write_last_row(&mut self) -> Result<(), Stop> {
        let width = self.grid.col_count();
        let mut text = String::new();
        if !self.sinks.is_open(StreamKind::Punch) || self.punch_header_width != width {
            text.push_str(&render_headings(self.grid.headings(), &self.delimiter));
        }
        if let Some(row) = self.grid.row(self.grid.row_count().saturating_sub(1)) {
            text.push_str(&render_row(row, width, &self.delimiter));
        }
        if self.write_file(StreamKind::Punch, &text)? {
            self.punch_header_width = width;
        }
        Ok(())
    }

    /// Best-effort sink write. An open failure is recorded once as an error;
    /// later writes to the failed sink are skipped. Only running out of memory
    /// while recording that error is returned.
    fn write_file(&mut self, stream: StreamKind, text: &str) -> Result<bool, Stop> {
        if self.sinks.has_failed(stream) {
            return Ok(false);
        }
        let newly_opened = match self.sinks.ensure_open(stream) {
            Ok(opened) => opened,
            Err(err) => {
                self.log_sink_failure(stream, &err);
                self.diagnostics.errors.add(&err.to_string())?;
                return Ok(false);
            }
        };
        if newly_opened {
            self.log_sink_opened(stream);
        }
        match self.sinks.write(stream, text) {
            Ok(()) => Ok(true),
            Err(err) => {
                self.log_sink_failure(stream, &err);
                Ok(false)
            }
        }
    }

    fn log_sink_opened(&self, stream: StreamKind) {
        if let Some(path) = self.event_log.as_deref() {
            append_session_event(
                path,
                "info",
                "sink.open",
                &format!("opened {stream} sink"),
                &[(
                    "path",
                    Value::String(self.sinks.path(stream).display().to_string()),
                )],
            );
        }
    }

    fn log_sink_failure(&self, stream: StreamKind, err: &CaptureError) {
        if let Some(path) = self.event_log.as_deref() {
            append_session_event(
                path,
                "error",
                "sink.failure",
                &err.to_string(),
                &[("stream", Value::String(stream.to_string()))],
            );
        }
    }
}
