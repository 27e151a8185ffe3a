//! # Docana Kernel
//!
//! Building blocks for the DOCUMENTATION block of a simulation README.
//!
//! The kernel knows nothing about surveys or light curves. It only prescribes
//! how configuration keys are accumulated and how the report lines that
//! describe them are rendered and stored.
//!
//! ## Architecture
//!
//! ```text
//! tokenize              ← "KEY: ARG ARG" lines and command-line overrides
//!     │
//! domain                ← routing table: key → documenting registry
//!     │
//! KeyArgRegistry        ← ordered entries, command-line override in place
//!     │
//! ListCompressor        ← adjacent same-key runs folded into "- ARG" blocks
//! ValueFormatter        ← emit-or-suppress + int/fixed/scientific rendering
//!     │
//! DocumentBuffer        ← append-only, capacity-bounded line store
//! ```

pub mod compress;
pub mod document;
pub mod domain;
pub mod error;
pub mod format;
pub mod keys;
pub mod tokenize;

pub use compress::ListCompressor;
pub use document::{DEFAULT_MAX_LINES, DocumentBuffer};
pub use domain::{Domain, KEY_ROUTES, KeyPattern, domain_for_key};
pub use error::DocanaError;
pub use format::{FieldSpec, ValueFormatter, render_value};
pub use keys::{AppendOutcome, DEFAULT_MAX_ENTRIES, Entry, KeyArgRegistry, KeySource};
pub use tokenize::{KeyLine, parse_key_lines, parse_override};
