//! In-process store backed by hash maps.

use rustc_hash::FxHashMap;

use crate::store::{Result, Store};

/// In-memory realization of [`Store`].
///
/// Frequencies live in one map, postings in another. Nothing here can fail
/// and nothing persists; transactions are inherited no-ops.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    terms: FxHashMap<String, i64>,
    deletes: FxHashMap<i32, Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct terms with a stored frequency.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of distinct posting keys.
    pub fn posting_key_count(&self) -> usize {
        self.deletes.len()
    }
}

impl Store for MemoryStore {
    fn add_delete(&mut self, fingerprint: i32, term: &str) -> Result<()> {
        // Duplicates are benign: lookup deduplicates suggestions itself.
        self.deletes
            .entry(fingerprint)
            .or_default()
            .push(term.to_string());
        Ok(())
    }

    fn terms_for(&self, fingerprint: i32) -> Result<Vec<String>> {
        Ok(self.deletes.get(&fingerprint).cloned().unwrap_or_default())
    }

    fn put_frequency(&mut self, term: &str, frequency: i64) -> Result<()> {
        self.terms.insert(term.to_string(), frequency);
        Ok(())
    }

    fn get_frequency(&self, term: &str) -> Result<Option<i64>> {
        Ok(self.terms.get(term).copied())
    }

    fn max_term_length(&self) -> Result<Option<usize>> {
        Ok(self.terms.keys().map(|term| term.len()).max())
    }
}
