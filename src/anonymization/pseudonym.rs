//! Deterministic pseudonym generation
//!
//! [`PseudonymGenerator`] maps original values to synthetic identifiers and
//! names. Values are derived from [`stable_hash`] so they are reproducible,
//! and each generator keeps two caches (identifiers and names) so repeated
//! originals within one message map to the same pseudonym.
//!
//! The name cache is shared by every [`NameKind`]: once a string has been
//! pseudonymized as a last name, asking for it as a first name returns the
//! cached last-name pseudonym.

use super::hashing::stable_hash;
use std::collections::HashMap;

/// First names used for synthetic first (and middle) names
pub const FIRST_NAMES: [&str; 10] = [
    "Patient",
    "Test",
    "Sample",
    "Demo",
    "Example",
    "Anonymous",
    "Unknown",
    "John",
    "Jane",
    "Person",
];

/// Last names used for synthetic last names
pub const LAST_NAMES: [&str; 10] = [
    "Doe",
    "Smith",
    "Test",
    "Sample",
    "Anonymous",
    "Person",
    "User",
    "Patient",
    "Example",
    "Demo",
];

/// Returned for blank names
pub const BLANK_NAME: &str = "ANONYMOUS";

/// Prefix used when a caller has no better one
pub const DEFAULT_ID_PREFIX: &str = "ID";

/// Which name list a synthetic name is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// Given name (also used for middle names)
    First,
    /// Family name
    Last,
    /// Neither; rendered as `AnonymousNNN`
    Generic,
}

/// Cache-backed generator of synthetic identifiers and names
///
/// One generator belongs to one engine, which in turn belongs to one message.
/// Sharing a generator across messages would couple pseudonyms of unrelated
/// subjects.
#[derive(Debug, Default)]
pub struct PseudonymGenerator {
    identifiers: HashMap<String, String>,
    names: HashMap<String, String>,
}

impl PseudonymGenerator {
    /// Create a generator with empty caches
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthetic identifier: `prefix` followed by six digits
    ///
    /// Blank input yields `prefix000000` and is not cached. Otherwise the
    /// result is cached by `original`, so the prefix only matters the first
    /// time an original is seen.
    pub fn pseudo_identifier(&mut self, original: &str, prefix: &str) -> String {
        if original.trim().is_empty() {
            return format!("{prefix}000000");
        }

        self.identifiers
            .entry(original.to_owned())
            .or_insert_with(|| format!("{prefix}{:06}", stable_hash(original) % 1_000_000))
            .clone()
    }

    /// Synthetic name for `original`
    ///
    /// Blank input yields [`BLANK_NAME`]. First and last names are drawn from
    /// [`FIRST_NAMES`] / [`LAST_NAMES`] with a two-digit suffix; generic names
    /// are `Anonymous` with a three-digit suffix.
    pub fn pseudo_name(&mut self, original: &str, kind: NameKind) -> String {
        if original.trim().is_empty() {
            return BLANK_NAME.to_string();
        }

        self.names
            .entry(original.to_owned())
            .or_insert_with(|| {
                let hash = stable_hash(original);
                let index = (hash % 10) as usize;
                match kind {
                    NameKind::First => format!("{}{:02}", FIRST_NAMES[index], hash % 100),
                    NameKind::Last => format!("{}{:02}", LAST_NAMES[index], hash % 100),
                    NameKind::Generic => format!("Anonymous{:03}", hash % 1000),
                }
            })
            .clone()
    }

    /// Number of cached identifiers
    pub fn cached_identifiers(&self) -> usize {
        self.identifiers.len()
    }

    /// Number of cached names
    pub fn cached_names(&self) -> usize {
        self.names.len()
    }
}
