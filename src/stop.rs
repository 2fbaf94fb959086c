use crate::router::StreamKind;
use crate::shared::CaptureError;

/// Fatal-abort control value.
///
/// Raised by the router when an emission is marked fatal (or when capture
/// can no longer allocate), carried out of the engine as the `Err` side of
/// every engine entry point, and handled only by the session's run and load
/// operations, which turn it into an error count.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Stop {
    #[error("run stopped by fatal {stream} message: {message}")]
    Fatal { stream: StreamKind, message: String },
    #[error("run stopped: out of memory while growing {what}")]
    OutOfMemory { what: &'static str },
}

impl Stop {
    /// Builds a fatal stop; a trailing line terminator is not part of the message.
    pub fn fatal(stream: StreamKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        let trimmed = message.trim_end_matches(['\r', '\n']).len();
        message.truncate(trimmed);
        Self::Fatal { stream, message }
    }
}

impl From<CaptureError> for Stop {
    fn from(value: CaptureError) -> Self {
        match value {
            CaptureError::OutOfMemory { what } => Stop::OutOfMemory { what },
            other => Stop::fatal(StreamKind::Error, other.to_string()),
        }
    }
}
