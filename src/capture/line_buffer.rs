use crate::shared::errors::{reserve_text, CaptureError};
use std::cell::OnceCell;
use std::ops::Range;

pub const LINE_TERMINATOR: char = '\n';

/// Text accumulator with a lazily rebuilt line index.
///
/// The index is dropped on every mutation and rebuilt by the next query, so
/// appending many fragments costs nothing until someone asks for lines. Only
/// terminated lines are indexed; a trailing fragment without a terminator is
/// part of [`LineBuffer::as_text`] but not yet a line.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    text: String,
    lines: OnceCell<Vec<Range<usize>>>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: &str) -> Result<(), CaptureError> {
        reserve_text(&mut self.text, text.len(), "line buffer")?;
        self.text.push_str(text);
        self.lines.take();
        Ok(())
    }

    /// Appends `text` followed by a terminator; nothing is written if the
    /// reservation fails.
    pub fn append_line(&mut self, text: &str) -> Result<(), CaptureError> {
        reserve_text(
            &mut self.text,
            text.len() + LINE_TERMINATOR.len_utf8(),
            "line buffer",
        )?;
        self.text.push_str(text);
        self.text.push(LINE_TERMINATOR);
        self.lines.take();
        Ok(())
    }

    pub fn as_text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.index().len()
    }

    /// Returns line `n` without its terminator, or `""` when `n` is out of range.
    pub fn line_at(&self, n: usize) -> &str {
        self.index()
            .get(n)
            .map(|range| &self.text[range.clone()])
            .unwrap_or("")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.index().iter().map(|range| &self.text[range.clone()])
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.lines.take();
    }

    fn index(&self) -> &[Range<usize>] {
        self.lines.get_or_init(|| {
            let mut ranges = Vec::new();
            let mut start = 0;
            for (at, _) in self.text.match_indices(LINE_TERMINATOR) {
                ranges.push(start..at);
                start = at + LINE_TERMINATOR.len_utf8();
            }
            ranges
        })
    }
}

#[cfg(test)]
mod tests {
    use super::LineBuffer;

    #[test]
    fn partial_fragments_join_into_one_line() {
        let mut buffer = LineBuffer::new();
        buffer.append("Ca ").expect("append");
        buffer.append("0.002").expect("append");
        assert_eq!(buffer.line_count(), 0);
        assert_eq!(buffer.line_at(0), "");

        buffer.append("\n").expect("append");
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line_at(0), "Ca 0.002");
    }

    #[test]
    fn index_is_rebuilt_after_mutation() {
        let mut buffer = LineBuffer::new();
        buffer.append("a\nb\n").expect("append");
        assert_eq!(buffer.line_count(), 2);

        buffer.append("c\n").expect("append");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line_at(2), "c");

        buffer.clear();
        assert_eq!(buffer.line_count(), 0);
        assert_eq!(buffer.as_text(), "");
    }

    #[test]
    fn empty_lines_and_carriage_returns_are_kept_verbatim() {
        let mut buffer = LineBuffer::new();
        buffer.append("\n\r\nx").expect("append");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line_at(0), "");
        assert_eq!(buffer.line_at(1), "\r");
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["", "\r"]);
    }
}
