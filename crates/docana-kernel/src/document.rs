//! Append-only line store for the DOCUMENTATION block.
//!
//! Lines are addressed by a cursor that only moves forward. A line is never
//! edited once appended, so a prefix `[0, checkpoint)` taken after the first
//! pass stays valid while later passes keep appending.

use crate::error::DocanaError;

/// Default line capacity of a document.
pub const DEFAULT_MAX_LINES: usize = 1000;

#[derive(Debug, Clone)]
pub struct DocumentBuffer {
    lines: Vec<String>,
    max_lines: usize,
}

impl Default for DocumentBuffer {
    fn default() -> Self {
        Self::with_max_lines(DEFAULT_MAX_LINES)
    }
}

impl DocumentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_lines(max_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_lines,
        }
    }

    /// Write `text` at the cursor and advance it. Returns the line index.
    pub fn append_line(&mut self, text: impl Into<String>) -> Result<usize, DocanaError> {
        let index = self.lines.len();
        if index >= self.max_lines {
            return Err(DocanaError::DocumentFull {
                line: index,
                limit: self.max_lines,
            });
        }
        self.lines.push(text.into());
        Ok(index)
    }

    /// Number of lines written so far.
    pub fn cursor(&self) -> usize {
        self.lines.len()
    }

    /// Current line count, recorded as a phase boundary.
    pub fn checkpoint(&self) -> usize {
        self.cursor()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines `[0, upto)`, clamped to what has been written.
    pub fn peek(&self, upto: usize) -> &[String] {
        &self.lines[..upto.min(self.lines.len())]
    }

    /// Newline-joined text with a trailing newline (empty for no lines).
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
