use super::stream::StreamKind;
use crate::config::Settings;
use crate::shared::CaptureError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct OpenSink {
    path: PathBuf,
    file: File,
}

/// Lazily opened file destinations, one per stream kind.
///
/// A sink is truncated when first opened and then kept open until it is
/// closed explicitly, redirected to another path, or the set is dropped.
/// After an open failure the sink stays closed and writes are skipped until
/// its path changes or the set is reset, so one bad path yields one error.
#[derive(Debug)]
pub struct FileSinks {
    paths: [PathBuf; 7],
    open: [Option<OpenSink>; 7],
    failed: [bool; 7],
}

impl FileSinks {
    pub fn new(settings: &Settings) -> Self {
        Self {
            paths: StreamKind::ALL.map(|kind| settings.sink_path(kind)),
            open: Default::default(),
            failed: [false; 7],
        }
    }

    pub fn path(&self, kind: StreamKind) -> &Path {
        &self.paths[kind.slot()]
    }

    pub fn is_open(&self, kind: StreamKind) -> bool {
        self.open[kind.slot()].is_some()
    }

    /// Points `kind` at `path`. Redirecting an open sink closes it first;
    /// setting the current path again changes nothing.
    pub fn set_path(&mut self, kind: StreamKind, path: PathBuf) {
        let slot = kind.slot();
        if self.paths[slot] == path {
            return;
        }
        self.open[slot] = None;
        self.failed[slot] = false;
        self.paths[slot] = path;
    }

    /// Opens the sink if it is not open yet. Returns `Ok(true)` when this call
    /// created the file handle.
    pub fn ensure_open(&mut self, kind: StreamKind) -> Result<bool, CaptureError> {
        let slot = kind.slot();
        if self.open[slot].is_some() {
            return Ok(false);
        }
        let path = self.paths[slot].clone();
        let opened = create_sink_file(&path).map_err(|source| {
            self.failed[slot] = true;
            CaptureError::OpenSink {
                path: path.display().to_string(),
                source,
            }
        })?;
        self.failed[slot] = false;
        self.open[slot] = Some(OpenSink { path, file: opened });
        Ok(true)
    }

    pub fn has_failed(&self, kind: StreamKind) -> bool {
        self.failed[kind.slot()]
    }

    pub fn write(&mut self, kind: StreamKind, text: &str) -> Result<(), CaptureError> {
        self.ensure_open(kind)?;
        let Some(sink) = self.open[kind.slot()].as_mut() else {
            return Ok(());
        };
        sink.file
            .write_all(text.as_bytes())
            .map_err(|source| CaptureError::WriteSink {
                path: sink.path.display().to_string(),
                source,
            })
    }

    pub fn close(&mut self, kind: StreamKind) {
        let slot = kind.slot();
        if let Some(mut sink) = self.open[slot].take() {
            let _ = sink.file.flush();
        }
        self.failed[slot] = false;
    }

    pub fn close_all(&mut self) {
        for kind in StreamKind::ALL {
            self.close(kind);
        }
    }
}

impl Drop for FileSinks {
    fn drop(&mut self) {
        self.close_all();
    }
}

fn create_sink_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}
