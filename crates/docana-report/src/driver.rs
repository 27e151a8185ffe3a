//! Two-pass README composition.
//!
//! ```text
//! Uninitialized --run_pass1--> Pass1Written --run_pass2--> Pass2Written
//! ```
//!
//! Pass 1 writes everything known before generation (overview, input keys,
//! input notes) and records the line count, so the README can be inspected
//! while the job runs. Pass 2 only appends the output summary and the end
//! marker. Any other order is rejected.

use crate::config::ReportConfig;
use crate::context::{Registries, ReportContext};
use crate::environment::RunEnvironment;
use crate::inputs::SimInputs;
use crate::sections::{self, SectionWriter};
use crate::stats::RunStats;
use docana_kernel::{DocanaError, DocumentBuffer, KeyLine, KeySource};
use std::fmt;

pub const DOC_START_MARKER: &str = "DOCUMENTATION:";
pub const DOC_END_MARKER: &str = "DOCUMENTATION_END:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    Uninitialized,
    Pass1Written,
    Pass2Written,
}

impl fmt::Display for ReportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Pass1Written => "pass1-written",
            Self::Pass2Written => "pass2-written",
        };
        f.write_str(s)
    }
}

/// How one input key line was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absorbed {
    pub listed: bool,
    pub typed: bool,
}

impl Absorbed {
    pub fn is_documented(self) -> bool {
        self.listed || self.typed
    }
}

#[derive(Debug)]
pub struct ReportDriver {
    config: ReportConfig,
    context: ReportContext,
    state: ReportState,
    init_line_count: usize,
}

impl ReportDriver {
    pub fn new(config: ReportConfig) -> Self {
        let context = ReportContext::new(&config);
        Self {
            config,
            context,
            state: ReportState::Uninitialized,
            init_line_count: 0,
        }
    }

    pub fn state(&self) -> ReportState {
        self.state
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn registries(&self) -> &Registries {
        self.context.registries()
    }

    pub fn document(&self) -> &DocumentBuffer {
        self.context.document()
    }

    pub fn into_document(self) -> DocumentBuffer {
        self.context.into_document()
    }

    /// Lines written by pass 1; zero before it runs.
    pub fn init_line_count(&self) -> usize {
        self.init_line_count
    }

    /// Lines written so far.
    pub fn line_count(&self) -> usize {
        self.document().cursor()
    }

    /// Empty every registry. Writes nothing; repeatable before pass 1.
    pub fn init(&mut self) -> Result<(), DocanaError> {
        self.require(ReportState::Uninitialized, "init")?;
        self.context.init();
        tracing::debug!("report registries initialized");
        Ok(())
    }

    /// Record one input key: store its typed value when the report reads
    /// one, then list it in its domain registry. A value that fails to parse
    /// is not listed.
    pub fn absorb(
        &mut self,
        inputs: &mut SimInputs,
        line: &KeyLine,
        source: KeySource,
    ) -> Result<Absorbed, DocanaError> {
        self.require(ReportState::Uninitialized, "absorb input keys")?;
        let typed = inputs.apply_key(&line.key, &line.args)?;
        let listed = self.context.route(&line.key, &line.args, source)?.is_some();
        if !listed && !typed {
            tracing::debug!(key = %line.key, line = line.line, "key is not documented");
        }
        Ok(Absorbed { listed, typed })
    }

    /// Write the open marker, OVERVIEW, INPUT_KEYS and INPUT_NOTES.
    /// Returns the checkpoint line count.
    pub fn run_pass1(
        &mut self,
        inputs: &SimInputs,
        env: &RunEnvironment,
    ) -> Result<usize, DocanaError> {
        self.require(ReportState::Uninitialized, "run pass 1")?;
        let key_width = self.config.key_width;
        let (registries, doc) = self.context.split();
        let mut w = SectionWriter::new(doc, key_width);

        w.raw(DOC_START_MARKER)?;
        sections::overview::write(&mut w, inputs, env)?;
        sections::input_keys::write(&mut w, registries, inputs, env)?;
        sections::input_notes::write(&mut w, inputs)?;

        self.init_line_count = self.line_count();
        self.state = ReportState::Pass1Written;
        tracing::info!(lines = self.init_line_count, "README pass 1 written");
        Ok(self.init_line_count)
    }

    /// Append OUTPUT_SUMMARY and the end marker. Returns the final line count.
    pub fn run_pass2(&mut self, inputs: &SimInputs, stats: &RunStats) -> Result<usize, DocanaError> {
        self.require(ReportState::Pass1Written, "run pass 2")?;
        let key_width = self.config.key_width;
        let (_, doc) = self.context.split();
        let mut w = SectionWriter::new(doc, key_width);

        sections::output_summary::write(&mut w, inputs, stats)?;
        w.raw(DOC_END_MARKER)?;

        self.state = ReportState::Pass2Written;
        let lines = self.line_count();
        tracing::info!(
            lines,
            appended = lines - self.init_line_count,
            "README pass 2 written"
        );
        Ok(lines)
    }

    fn require(&self, expected: ReportState, action: &'static str) -> Result<(), DocanaError> {
        if self.state == expected {
            return Ok(());
        }
        Err(DocanaError::InvalidTransition {
            state: self.state.to_string(),
            action,
        })
    }
}
