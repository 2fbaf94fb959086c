#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("out of memory while growing {what}")]
    OutOfMemory { what: &'static str },
    #[error("failed to open sink {path}: {source}")]
    OpenSink {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write sink {path}: {source}")]
    WriteSink {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to export selected output to {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CaptureError {
    pub(crate) fn out_of_memory(what: &'static str) -> Self {
        Self::OutOfMemory { what }
    }
}

/// Reserves room for `additional` bytes, mapping allocation failure to
/// [`CaptureError::OutOfMemory`] instead of aborting the process.
pub(crate) fn reserve_text(
    target: &mut String,
    additional: usize,
    what: &'static str,
) -> Result<(), CaptureError> {
    target
        .try_reserve(additional)
        .map_err(|_| CaptureError::out_of_memory(what))
}

pub(crate) fn reserve_items<T>(
    target: &mut Vec<T>,
    additional: usize,
    what: &'static str,
) -> Result<(), CaptureError> {
    target
        .try_reserve(additional)
        .map_err(|_| CaptureError::out_of_memory(what))
}
