//! Boundary to the external computation engine.
//!
//! The engine is opaque: it receives definitions and input text, and reports
//! everything it produces through the [`EngineIo`] it is handed. That context
//! is the only channel back into the session; nothing is routed through
//! globals. A fatal condition surfaces as `Err(Stop)` and is propagated with
//! `?` up to the engine entry point.

pub mod shared;

pub use shared::SharedEngine;

use crate::router::{Action, Router, StreamKind};
use crate::selected_output::Cell;
use crate::stop::Stop;
use std::fmt;
use std::path::PathBuf;

pub trait Engine {
    /// Replaces all definitions with those in `database`.
    fn load_database(&mut self, database: &str, io: &mut EngineIo<'_>) -> Result<(), Stop>;

    /// Runs `input` against the loaded definitions.
    fn run(&mut self, input: &str, io: &mut EngineIo<'_>) -> Result<(), Stop>;

    /// Components known after the most recent load or run.
    fn components(&self) -> Vec<String>;

    /// Drops all loaded definitions and any engine-internal state.
    fn unload(&mut self);
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn load_database(&mut self, database: &str, io: &mut EngineIo<'_>) -> Result<(), Stop> {
        (**self).load_database(database, io)
    }

    fn run(&mut self, input: &str, io: &mut EngineIo<'_>) -> Result<(), Stop> {
        (**self).run(input, io)
    }

    fn components(&self) -> Vec<String> {
        (**self).components()
    }

    fn unload(&mut self) {
        (**self).unload()
    }
}

/// Context handed to the engine for the duration of one load or run.
pub struct EngineIo<'a> {
    router: &'a mut Router,
}

impl<'a> EngineIo<'a> {
    pub fn new(router: &'a mut Router) -> Self {
        Self { router }
    }

    pub fn dispatch(&mut self, action: Action) -> Result<bool, Stop> {
        self.router.dispatch(action)
    }

    pub fn emit(&mut self, stream: StreamKind, text: impl Into<String>) -> Result<(), Stop> {
        self.dispatch(Action::Write {
            stream,
            text: text.into(),
            fatal: false,
        })
        .map(|_| ())
    }

    /// Expands `args` exactly once; the router only ever sees the finished text.
    pub fn emit_fmt(
        &mut self,
        stream: StreamKind,
        args: fmt::Arguments<'_>,
        fatal: bool,
    ) -> Result<(), Stop> {
        self.dispatch(Action::Write {
            stream,
            text: args.to_string(),
            fatal,
        })
        .map(|_| ())
    }

    pub fn error(&mut self, message: impl Into<String>) -> Result<(), Stop> {
        self.emit(StreamKind::Error, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> Result<(), Stop> {
        self.emit(StreamKind::Warning, message)
    }

    /// Records `message` as an error and yields the stop to return.
    pub fn fatal(&mut self, message: impl Into<String>) -> Stop {
        let message = message.into();
        match self.dispatch(Action::Write {
            stream: StreamKind::Error,
            text: message.clone(),
            fatal: true,
        }) {
            Err(stop) => stop,
            Ok(_) => Stop::fatal(StreamKind::Error, message),
        }
    }

    pub fn punch(&mut self, name: &str, value: impl Into<Cell>) -> Result<(), Stop> {
        self.dispatch(Action::Punch {
            name: name.to_string(),
            value: value.into(),
        })
        .map(|_| ())
    }

    pub fn end_row(&mut self) -> Result<(), Stop> {
        self.dispatch(Action::EndRow).map(|_| ())
    }

    pub fn open_sink(&mut self, stream: StreamKind, path: impl Into<PathBuf>) -> Result<bool, Stop> {
        self.dispatch(Action::OpenSink {
            stream,
            path: path.into(),
        })
    }

    pub fn close_sink(&mut self, stream: StreamKind) -> Result<(), Stop> {
        self.dispatch(Action::CloseSink { stream }).map(|_| ())
    }

    pub fn is_open(&mut self, stream: StreamKind) -> Result<bool, Stop> {
        self.dispatch(Action::QueryIsOpen { stream })
    }
}
