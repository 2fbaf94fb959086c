use super::Session;
use crate::engine::{Engine, EngineIo};
use crate::shared::logging::append_session_event;
use crate::shared::CaptureError;
use crate::stop::Stop;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub(crate) const NO_DATABASE_MESSAGE: &str = "No database is loaded";

/// Where the input of a run came from; recorded in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunSource {
    Accumulated,
    File,
    String,
}

impl RunSource {
    fn as_str(self) -> &'static str {
        match self {
            RunSource::Accumulated => "accumulated",
            RunSource::File => "file",
            RunSource::String => "string",
        }
    }
}

impl<E: Engine> Session<E> {
    /// Loads definitions from the file at `path`, replacing any previous
    /// definitions. Returns the number of errors.
    pub fn load_database(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        match read_input(path) {
            Ok(text) => self.load_database_string(&text),
            Err(err) => {
                self.unload_database();
                self.router.begin_cycle();
                self.record_error(&err.to_string());
                self.log_load();
                self.error_count()
            }
        }
    }

    /// Loads definitions from `text`, replacing any previous definitions.
    /// Returns the number of errors.
    pub fn load_database_string(&mut self, text: &str) -> usize {
        self.unload_database();
        self.router.begin_cycle();

        let outcome = {
            let mut io = EngineIo::new(&mut self.router);
            self.engine.load_database(text, &mut io)
        };
        self.settle(outcome);

        self.database_loaded = self.error_count() == 0;
        self.components = self.engine.components();
        self.log_load();
        self.error_count()
    }

    /// Drops loaded definitions and closes every file sink.
    pub fn unload_database(&mut self) {
        self.engine.unload();
        self.router.close_all_sinks();
        self.components.clear();
        self.database_loaded = false;
    }

    /// Runs the accumulated input. The staged lines stay readable until the
    /// next [`Session::accumulate_line`] starts a new batch.
    pub fn run_accumulated(&mut self) -> usize {
        let input = self.accumulator.get().to_string();
        self.accumulator.mark_consumed();
        self.run_input(RunSource::Accumulated, &input)
    }

    pub fn run_file(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        match read_input(path) {
            Ok(text) => self.run_input(RunSource::File, &text),
            Err(err) => {
                self.router.begin_cycle();
                self.record_error(&err.to_string());
                self.log_run(RunSource::File, false);
                self.error_count()
            }
        }
    }

    pub fn run_string(&mut self, input: &str) -> usize {
        self.run_input(RunSource::String, input)
    }

    pub(crate) fn run_input(&mut self, source: RunSource, input: &str) -> usize {
        self.router.begin_cycle();
        if !self.database_loaded {
            self.record_error(NO_DATABASE_MESSAGE);
            self.log_run(source, false);
            return self.error_count();
        }

        let outcome = {
            let mut io = EngineIo::new(&mut self.router);
            self.engine.run(input, &mut io)
        };
        let aborted = self.settle(outcome);

        self.components = self.engine.components();
        self.log_run(source, aborted);
        self.error_count()
    }

    /// The single place a [`Stop`] is handled. Committed rows and every
    /// diagnostic recorded so far are kept; only a staged row is dropped.
    /// Returns whether the run was aborted.
    fn settle(&mut self, outcome: Result<(), Stop>) -> bool {
        let stop = match outcome {
            Ok(()) => match self.router.end_row() {
                Ok(()) => return false,
                Err(stop) => stop,
            },
            Err(stop) => stop,
        };

        self.router.grid_mut().discard_staged();
        if !self.router.take_stop_counted() {
            self.record_error(&stop.to_string());
        }
        true
    }

    fn record_error(&mut self, message: &str) {
        let _ = self.router.diagnostics_mut().errors.add(message);
    }

    fn log_load(&self) {
        let Some(path) = self.router.event_log() else {
            return;
        };
        let errors = self.error_count();
        append_session_event(
            path,
            if errors == 0 { "info" } else { "error" },
            "session.load",
            &format!("database load finished with {errors} error(s)"),
            &[
                ("errors", Value::from(errors)),
                ("components", Value::from(self.components.len())),
            ],
        );
    }

    fn log_run(&self, source: RunSource, aborted: bool) {
        let Some(path) = self.router.event_log() else {
            return;
        };
        let errors = self.error_count();
        append_session_event(
            path,
            if errors == 0 { "info" } else { "error" },
            "session.run",
            &format!("{} run finished with {errors} error(s)", source.as_str()),
            &[
                ("source", Value::String(source.as_str().to_string())),
                ("errors", Value::from(errors)),
                (
                    "warnings",
                    Value::from(self.router.diagnostics().warnings.count()),
                ),
                ("rows", Value::from(self.router.grid().row_count())),
                ("aborted", Value::Bool(aborted)),
            ],
        );
    }
}

fn read_input(path: &Path) -> Result<String, CaptureError> {
    fs::read_to_string(path).map_err(|source| CaptureError::ReadInput {
        path: path.display().to_string(),
        source,
    })
}
