use super::line_buffer::LineBuffer;
use crate::shared::CaptureError;
use std::io::Write;

/// One counted stream of diagnostic messages (errors or warnings).
#[derive(Debug, Default, Clone)]
pub struct Reporter {
    buffer: LineBuffer,
    count: usize,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` as one line and returns the count after the increment.
    pub fn add(&mut self, message: &str) -> Result<usize, CaptureError> {
        self.buffer.append_line(message)?;
        self.count += 1;
        Ok(self.count)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn as_text(&self) -> &str {
        self.buffer.as_text()
    }

    pub fn line_at(&self, n: usize) -> &str {
        self.buffer.line_at(n)
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writer.write_all(self.buffer.as_text().as_bytes())
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.count = 0;
    }
}

/// Errors and warnings accumulated since the last load or run started.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    pub errors: Reporter,
    pub warnings: Reporter,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called at the start of every load/run cycle, never mid-run.
    pub fn reset(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }
}
