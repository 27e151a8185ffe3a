//! README composition for a light-curve simulation job.
//!
//! Builds the `DOCUMENTATION:` block of a simulation's README on top of the
//! kernel's registries, formatter and document buffer.
//!
//! ```text
//! key lines ──► ReportDriver::absorb ──► Registries + SimInputs
//!                                              │
//! RunEnvironment ──► run_pass1 ◄───────────────┘   OVERVIEW, INPUT_KEYS, INPUT_NOTES
//! RunStats       ──► run_pass2                     OUTPUT_SUMMARY
//!                        │
//!                        ▼
//!                  write_document
//! ```

pub mod config;
pub mod context;
pub mod driver;
pub mod environment;
pub mod error;
pub mod inputs;
pub mod population;
pub mod sections;
pub mod stats;
pub mod writer;

pub use config::ReportConfig;
pub use context::{Registries, ReportContext};
pub use driver::{Absorbed, DOC_END_MARKER, DOC_START_MARKER, ReportDriver, ReportState};
pub use environment::RunEnvironment;
pub use error::ReportError;
pub use inputs::{PipelineLogic, SimInputs, is_ignored_file};
pub use stats::{RunStats, SeasonYield};
pub use writer::write_document;
