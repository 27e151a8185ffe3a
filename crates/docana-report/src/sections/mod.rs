//! Section builders for the DOCUMENTATION block.
//!
//! Each builder appends its lines through a [`SectionWriter`], which fixes
//! the indent and key column shared by every keyed line.

pub(crate) mod input_keys;
pub(crate) mod input_notes;
pub(crate) mod output_summary;
pub(crate) mod overview;

use docana_kernel::{
    DocanaError, DocumentBuffer, FieldSpec, KeyArgRegistry, ListCompressor, ValueFormatter,
};
use std::fmt::Display;

pub const OVERVIEW: &str = "OVERVIEW";
pub const INPUT_KEYS: &str = "INPUT_KEYS";
pub const INPUT_NOTES: &str = "INPUT_NOTES";
pub const OUTPUT_SUMMARY: &str = "OUTPUT_SUMMARY";

const PAD: &str = "    ";

pub(crate) struct SectionWriter<'a> {
    doc: &'a mut DocumentBuffer,
    key_width: usize,
    formatter: ValueFormatter,
    compressor: ListCompressor,
}

impl<'a> SectionWriter<'a> {
    pub(crate) fn new(doc: &'a mut DocumentBuffer, key_width: usize) -> Self {
        Self {
            doc,
            key_width,
            formatter: ValueFormatter::new(PAD, key_width),
            compressor: ListCompressor::new(PAD, key_width),
        }
    }

    pub(crate) fn pad(&self) -> &'static str {
        PAD
    }

    /// Append `text` as-is, minus trailing whitespace.
    pub(crate) fn raw(&mut self, text: impl AsRef<str>) -> Result<(), DocanaError> {
        self.doc.append_line(text.as_ref().trim_end())?;
        Ok(())
    }

    /// `  NAME:`
    pub(crate) fn header(&mut self, name: &str) -> Result<(), DocanaError> {
        self.raw(format!("  {name}:"))
    }

    /// `# text`
    pub(crate) fn comment(&mut self, text: &str) -> Result<(), DocanaError> {
        self.raw(format!("# {text}"))
    }

    /// `<pad><key padded to width> <value>`
    pub(crate) fn keyed(&mut self, key: &str, value: impl Display) -> Result<(), DocanaError> {
        let line = format!("{PAD}{key:<width$} {value}", width = self.key_width);
        self.raw(line)
    }

    /// A formatter-checked numeric field. Returns whether it was written.
    pub(crate) fn field(&mut self, spec: FieldSpec, values: &[f64]) -> Result<bool, DocanaError> {
        match self.formatter.format(&spec, values) {
            Some(line) => {
                self.raw(line)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn list(&mut self, registry: &KeyArgRegistry) -> Result<usize, DocanaError> {
        self.compressor.write(registry, self.doc)
    }
}

pub(crate) fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}
