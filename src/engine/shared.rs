use super::{Engine, EngineIo};
use crate::stop::Stop;
use std::sync::{Arc, Mutex, MutexGuard};

/// Serializes entry into one engine shared by several sessions.
///
/// Use this when the engine keeps process-wide state: each call holds the
/// lock for the whole load or run, so engine-internal calls from two sessions
/// never interleave. Sessions still keep separate buffers and grids.
#[derive(Debug, Default)]
pub struct SharedEngine<E> {
    inner: Arc<Mutex<E>>,
}

impl<E> Clone for SharedEngine<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> SharedEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Poisoning is ignored: engine state is only trusted after an explicit load.
    fn lock(&self) -> MutexGuard<'_, E> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E: Engine> Engine for SharedEngine<E> {
    fn load_database(&mut self, database: &str, io: &mut EngineIo<'_>) -> Result<(), Stop> {
        self.lock().load_database(database, io)
    }

    fn run(&mut self, input: &str, io: &mut EngineIo<'_>) -> Result<(), Stop> {
        self.lock().run(input, io)
    }

    fn components(&self) -> Vec<String> {
        self.lock().components()
    }

    fn unload(&mut self) {
        self.lock().unload()
    }
}
