use crate::shared::errors::{reserve_text, CaptureError};

/// Staged multi-line input for a later run.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    staged: String,
    clear_on_next_append: bool,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_line(&mut self, line: &str) -> Result<(), CaptureError> {
        if self.clear_on_next_append {
            self.staged.clear();
            self.clear_on_next_append = false;
        }
        reserve_text(&mut self.staged, line.len() + 1, "accumulated input")?;
        self.staged.push_str(line);
        self.staged.push('\n');
        Ok(())
    }

    pub fn clear(&mut self) {
        self.staged.clear();
        self.clear_on_next_append = false;
    }

    pub fn get(&self) -> &str {
        &self.staged
    }

    /// Marks the staged input as consumed; it stays readable until the next
    /// append starts a fresh batch.
    pub(crate) fn mark_consumed(&mut self) {
        self.clear_on_next_append = true;
    }
}
