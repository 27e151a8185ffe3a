//! Key/argument registries: the memory of every documented input key.
//!
//! One registry exists per [`Domain`]. Entries keep insertion order because
//! list compression only folds *adjacent* repeats of a key.
//!
//! Source semantics:
//! - file entries always append, so intentionally repeated keys (several
//!   `FILTER:` lines, for example) are preserved verbatim
//! - command-line entries replace the argument of the first entry with the
//!   same key, and only append when no such entry exists

use crate::domain::Domain;
use crate::error::DocanaError;
use serde::{Deserialize, Serialize};

/// Default upper bound on entries per registry.
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Where a key/argument pair was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    FromFile,
    FromCommandLine,
}

/// One documented key with its space-joined argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub key: String,
    pub argument: String,
    pub source: KeySource,
}

/// What [`KeyArgRegistry::append`] did with the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A new entry was stored at this position.
    Appended(usize),
    /// The argument of the entry at this position was replaced.
    Overridden(usize),
}

/// Ordered key/argument entries for one configuration domain.
#[derive(Debug, Clone)]
pub struct KeyArgRegistry {
    domain: Domain,
    entries: Vec<Entry>,
    max_entries: usize,
}

impl KeyArgRegistry {
    pub fn new(domain: Domain) -> Self {
        Self::with_max_entries(domain, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(domain: Domain, max_entries: usize) -> Self {
        Self {
            domain,
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Drop every entry and release storage. Safe to call repeatedly.
    pub fn init(&mut self) {
        self.entries = Vec::new();
    }

    /// Record `key` with `tokens` joined by single spaces.
    ///
    /// A command-line key that already exists overrides the stored argument
    /// in place; the entry count does not change.
    pub fn append<S: AsRef<str>>(
        &mut self,
        key: &str,
        tokens: &[S],
        source: KeySource,
    ) -> Result<AppendOutcome, DocanaError> {
        let key = normalize_key(key).ok_or(DocanaError::EmptyKey {
            domain: self.domain,
        })?;
        let argument = join_tokens(tokens);

        if source == KeySource::FromCommandLine
            && let Some(index) = self.entries.iter().position(|entry| entry.key == key)
        {
            tracing::debug!(
                domain = %self.domain,
                key = %key,
                previous = %self.entries[index].argument,
                argument = %argument,
                "command-line override"
            );
            let entry = &mut self.entries[index];
            entry.argument = argument;
            entry.source = source;
            return Ok(AppendOutcome::Overridden(index));
        }

        if self.entries.len() >= self.max_entries {
            return Err(DocanaError::RegistryFull {
                domain: self.domain,
                limit: self.max_entries,
            });
        }

        self.entries.push(Entry {
            key,
            argument,
            source,
        });
        Ok(AppendOutcome::Appended(self.entries.len() - 1))
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at 0-based insertion position.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a KeyArgRegistry {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Trim `key` and make it colon-terminated. `None` for a blank key.
pub fn normalize_key(key: &str) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.trim_end_matches(':').is_empty() {
        return None;
    }
    if trimmed.ends_with(':') {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}:"))
    }
}

fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ")
}
