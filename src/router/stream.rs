use crate::selected_output::Cell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Category of engine-emitted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Output,
    Error,
    Warning,
    Log,
    Screen,
    Punch,
    Dump,
}

impl StreamKind {
    pub const ALL: [StreamKind; 7] = [
        StreamKind::Output,
        StreamKind::Error,
        StreamKind::Warning,
        StreamKind::Log,
        StreamKind::Screen,
        StreamKind::Punch,
        StreamKind::Dump,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Output => "output",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Log => "log",
            Self::Screen => "screen",
            Self::Punch => "punch",
            Self::Dump => "dump",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "output" => Ok(Self::Output),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "log" => Ok(Self::Log),
            "screen" => Ok(Self::Screen),
            "punch" => Ok(Self::Punch),
            "dump" => Ok(Self::Dump),
            _ => Err(
                "stream must be one of: output, error, warning, log, screen, punch, dump"
                    .to_string(),
            ),
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Output => "phreeqc.out",
            Self::Error => "phreeqc.err",
            Self::Warning => "phreeqc.warn",
            Self::Log => "phreeqc.log",
            Self::Screen => "phreeqc.screen",
            Self::Punch => "selected.out",
            Self::Dump => "dump.out",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the engine can ask of its single dispatch entry point.
///
/// Text arrives already formatted; punched values arrive already typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Write {
        stream: StreamKind,
        text: String,
        fatal: bool,
    },
    Punch {
        name: String,
        value: Cell,
    },
    EndRow,
    OpenSink {
        stream: StreamKind,
        path: PathBuf,
    },
    CloseSink {
        stream: StreamKind,
    },
    QueryIsOpen {
        stream: StreamKind,
    },
}
