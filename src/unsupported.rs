//! Roman sequences with no faithful Brahmi representation.
//!
//! Each entry substitutes an approximation and carries a human-readable
//! warning. The table is validated when it is built: an approximation that is
//! (or contains) another key would re-trigger substitution forever, so such
//! tables are rejected outright rather than guarded at runtime.

use std::sync::OnceLock;

/// Built-in approximations: `(sequence, approximation)`.
const BUILTIN: &[(&str, &str)] = &[("sha", "sa"), ("ksha", "ksa"), ("aum", "om")];

#[derive(Debug, Clone)]
pub struct UnsupportedMapping {
    pub approximation: String,
    pub warning: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UnsupportedTableError {
    #[error("empty key")]
    EmptyKey,
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("approximation {approximation:?} for {key:?} is itself a key")]
    ApproximationIsKey { key: String, approximation: String },
    #[error("approximation {approximation:?} for {key:?} contains the key {contained:?}")]
    ApproximationContainsKey {
        key: String,
        approximation: String,
        contained: String,
    },
}

#[derive(Debug)]
pub struct UnsupportedTable {
    /// `(lowercased key, mapping)`, longest key first.
    entries: Vec<(String, UnsupportedMapping)>,
}

impl UnsupportedTable {
    pub fn new(rows: &[(&str, &str)]) -> Result<Self, UnsupportedTableError> {
        let mut entries: Vec<(String, UnsupportedMapping)> = Vec::with_capacity(rows.len());
        for &(key, approximation) in rows {
            if key.is_empty() {
                return Err(UnsupportedTableError::EmptyKey);
            }
            let key = key.to_lowercase();
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(UnsupportedTableError::DuplicateKey(key));
            }
            entries.push((
                key.clone(),
                UnsupportedMapping {
                    approximation: approximation.to_string(),
                    warning: format!(
                        "no Brahmi letters for \"{key}\"; \"{approximation}\" was written instead"
                    ),
                },
            ));
        }

        for (key, mapping) in &entries {
            let approximation = mapping.approximation.to_lowercase();
            for (other, _) in &entries {
                if approximation == *other {
                    return Err(UnsupportedTableError::ApproximationIsKey {
                        key: key.clone(),
                        approximation: mapping.approximation.clone(),
                    });
                }
                if approximation.contains(other.as_str()) {
                    return Err(UnsupportedTableError::ApproximationContainsKey {
                        key: key.clone(),
                        approximation: mapping.approximation.clone(),
                        contained: other.clone(),
                    });
                }
            }
        }

        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Ok(Self { entries })
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static UnsupportedTable {
        static INSTANCE: OnceLock<UnsupportedTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            UnsupportedTable::new(BUILTIN).expect("built-in unsupported table must be valid")
        })
    }

    /// Longest key matching a prefix of `input`, case-insensitively.
    /// Returns the matched byte length and the mapping.
    pub fn longest_match(&self, input: &str) -> Option<(usize, &UnsupportedMapping)> {
        for (key, mapping) in &self.entries {
            if let Some(prefix) = input.get(..key.len()) {
                if prefix.eq_ignore_ascii_case(key) {
                    return Some((key.len(), mapping));
                }
            }
        }
        None
    }

    pub fn lookup(&self, key: &str) -> Option<&UnsupportedMapping> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, m)| m)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
