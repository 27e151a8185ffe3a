//! Rendering of a registry as report lines, folding adjacent repeated keys.
//!
//! A key that appears once renders as `KEY ARG`. A run of adjacent entries
//! with the same key renders as
//!
//! ```text
//! KEY
//! - ARG0
//! - ARG1
//! ```
//!
//! Only adjacent repeats fold. The same key reappearing later in the
//! registry starts a new block.

use crate::document::DocumentBuffer;
use crate::error::DocanaError;
use crate::keys::{Entry, KeyArgRegistry};

#[derive(Debug, Clone)]
pub struct ListCompressor {
    pad: String,
    key_width: usize,
}

impl ListCompressor {
    pub fn new(pad: impl Into<String>, key_width: usize) -> Self {
        Self {
            pad: pad.into(),
            key_width,
        }
    }

    /// Lines for `entries`, in order.
    pub fn render(&self, entries: &[Entry]) -> Vec<String> {
        let pad = &self.pad;
        let mut lines = Vec::new();
        let mut previous_key: Option<&str> = None;

        for (index, entry) in entries.iter().enumerate() {
            let key = entry.key.as_str();
            let is_new = previous_key != Some(key);
            let is_unique = is_new
                && entries
                    .get(index + 1)
                    .is_none_or(|next| next.key != entry.key);

            if is_new && is_unique {
                let line = format!(
                    "{pad}{key:<width$} {}",
                    entry.argument,
                    width = self.key_width
                );
                lines.push(line.trim_end().to_string());
            } else if is_new {
                lines.push(format!("{pad}{key}"));
            }

            if !is_unique {
                lines.push(format!("{pad}- {}", entry.argument).trim_end().to_string());
            }

            previous_key = Some(key);
        }

        lines
    }

    /// Append the rendering of `registry` to `doc`. Returns lines written.
    pub fn write(
        &self,
        registry: &KeyArgRegistry,
        doc: &mut DocumentBuffer,
    ) -> Result<usize, DocanaError> {
        let lines = self.render(registry.entries());
        let written = lines.len();
        for line in lines {
            doc.append_line(line)?;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::keys::KeySource;

    fn registry(pairs: &[(&str, &str)]) -> KeyArgRegistry {
        let mut keys = KeyArgRegistry::new(Domain::Filter);
        for (key, arg) in pairs {
            keys.append(key, &[*arg], KeySource::FromFile).unwrap();
        }
        keys
    }

    #[test]
    fn non_adjacent_duplicates_are_not_merged() {
        let keys = registry(&[("A", "1"), ("A", "2"), ("B", "1"), ("A", "3")]);
        let lines = ListCompressor::new("", 2).render(keys.entries());
        assert_eq!(lines, ["A:", "- 1", "- 2", "B: 1", "A: 3"]);
    }

    #[test]
    fn unique_keys_render_padded_on_one_line() {
        let keys = registry(&[("HOSTLIB_FILE", "hosts.HOSTLIB"), ("HOSTLIB_MSKOPT", "258")]);
        let lines = ListCompressor::new("    ", 16).render(keys.entries());
        assert_eq!(
            lines,
            [
                "    HOSTLIB_FILE:    hosts.HOSTLIB",
                "    HOSTLIB_MSKOPT:  258",
            ]
        );
    }

    #[test]
    fn run_at_end_of_registry_is_folded() {
        let keys = registry(&[("GENMODEL", "SALT2"), ("FILTER", "g"), ("FILTER", "r")]);
        let lines = ListCompressor::new("", 9).render(keys.entries());
        assert_eq!(lines, ["GENMODEL: SALT2", "FILTER:", "- g", "- r"]);
    }

    #[test]
    fn empty_arguments_leave_no_trailing_whitespace() {
        let mut keys = KeyArgRegistry::new(Domain::Simlib);
        let none: [&str; 0] = [];
        keys.append("SIMLIB_NOREWIND", &none, KeySource::FromFile).unwrap();
        keys.append("FILTER", &none, KeySource::FromFile).unwrap();
        keys.append("FILTER", &none, KeySource::FromFile).unwrap();

        let lines = ListCompressor::new("    ", 24).render(keys.entries());
        assert_eq!(lines, ["    SIMLIB_NOREWIND:", "    FILTER:", "    -", "    -"]);
    }

    #[test]
    fn empty_registry_writes_nothing() {
        let keys = registry(&[]);
        let mut doc = DocumentBuffer::new();
        let written = ListCompressor::new("  ", 24).write(&keys, &mut doc).unwrap();
        assert_eq!(written, 0);
        assert!(doc.is_empty());
    }

    #[test]
    fn write_propagates_document_capacity() {
        let keys = registry(&[("A", "1"), ("A", "2")]);
        let mut doc = DocumentBuffer::with_max_lines(2);
        let err = ListCompressor::new("", 2).write(&keys, &mut doc).unwrap_err();
        assert!(matches!(err, DocanaError::DocumentFull { .. }));
    }
}
