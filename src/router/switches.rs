use super::stream::StreamKind;
use crate::config::SwitchSettings;

/// Two independent switches per stream kind: write to the kind's file sink,
/// and capture into the kind's in-memory structure.
///
/// Error, warning, and punch capture cannot be turned off; diagnostics and
/// the selected-output grid are always populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Switches {
    file: [bool; 7],
    capture: [bool; 7],
}

impl Switches {
    pub fn from_settings(settings: &SwitchSettings) -> Self {
        let mut switches = Self::default();
        switches.set_file_on(StreamKind::Output, settings.output_file);
        switches.set_file_on(StreamKind::Log, settings.log_file);
        switches.set_file_on(StreamKind::Error, settings.error_file);
        switches.set_file_on(StreamKind::Warning, settings.error_file);
        switches.set_file_on(StreamKind::Dump, settings.dump_file);
        switches.set_file_on(StreamKind::Punch, settings.selected_output_file);
        switches.set_capture_on(StreamKind::Dump, settings.dump_string);
        switches.set_capture_on(StreamKind::Output, settings.output_string);
        switches.set_capture_on(StreamKind::Log, settings.log_string);
        switches
    }

    pub fn file_on(&self, kind: StreamKind) -> bool {
        self.file[kind.slot()]
    }

    pub fn set_file_on(&mut self, kind: StreamKind, on: bool) {
        self.file[kind.slot()] = on;
    }

    pub fn capture_on(&self, kind: StreamKind) -> bool {
        is_always_captured(kind) || self.capture[kind.slot()]
    }

    pub fn set_capture_on(&mut self, kind: StreamKind, on: bool) {
        if !is_always_captured(kind) {
            self.capture[kind.slot()] = on;
        }
    }
}

fn is_always_captured(kind: StreamKind) -> bool {
    matches!(
        kind,
        StreamKind::Error | StreamKind::Warning | StreamKind::Punch
    )
}
