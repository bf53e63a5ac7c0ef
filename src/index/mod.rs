//! The symmetric-delete index: insertion, promotion, and lookup.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::distance::bounded_osa_distance;
use crate::edits::prefix_deletes;
use crate::fingerprint::fingerprint;
use crate::store::{self, Store};
use crate::suggestion::{Suggestion, Verbosity};

/// Default maximum edit distance for index construction and lookup.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Default length of the leading substring that is actually indexed.
pub const DEFAULT_PREFIX_LENGTH: usize = 7;

/// A spelling-correction index over a pluggable [`Store`].
///
/// Terms are inserted with frequencies; once a term's accumulated frequency
/// reaches the count threshold it is promoted: its frequency is persisted
/// and every delete-variant of its prefix is posted under a fingerprint.
/// Lookup expands the query by the same delete operation and verifies
/// candidates with a bounded edit distance, so insertions, deletions,
/// substitutions, and transpositions in the query are all reached through
/// deletes alone.
///
/// The index owns its store exclusively. A single instance supports one
/// writer; lookups may run concurrently only while no writer is active.
///
/// # Example
///
/// ```rust
/// use symdex::prelude::*;
///
/// let mut index = SymSpell::new(MemoryStore::new());
/// index.insert("hello", 1000);
/// index.insert("help", 100);
///
/// let suggestions = index.lookup("hellp", Verbosity::Closest);
/// assert_eq!(suggestions[0].term, "hello");
/// ```
#[derive(Debug)]
pub struct SymSpell<S: Store> {
    store: S,
    max_edit_distance: usize,
    prefix_length: usize,
    count_threshold: i64,
    max_word_length: usize,
    pending: FxHashMap<String, i64>,
}

impl<S: Store> SymSpell<S> {
    /// Create an index with the default configuration (edit distance 2,
    /// prefix length 7, count threshold 1).
    pub fn new(store: S) -> Self {
        Self::with_config(store, DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_PREFIX_LENGTH)
    }

    /// Create an index with an explicit edit distance and prefix length.
    ///
    /// The prefix length is clamped to at least `max_edit_distance`; a
    /// shorter prefix could not absorb that many deletions.
    pub fn with_config(store: S, max_edit_distance: usize, prefix_length: usize) -> Self {
        let prefix_length = prefix_length.max(max_edit_distance);

        // A reopened persistent dictionary knows its longest term; a fresh
        // store reports nothing and the hint grows with insertions.
        let max_word_length = match store.max_term_length() {
            Ok(len) => len.unwrap_or(0),
            Err(err) => {
                debug!(error = %err, "could not seed max word length from store");
                0
            }
        };

        SymSpell {
            store,
            max_edit_distance,
            prefix_length,
            count_threshold: 1,
            max_word_length,
            pending: FxHashMap::default(),
        }
    }

    /// Insert `key` with the given occurrence count.
    ///
    /// Counts accumulate with saturation. Returns `true` only when this
    /// call promoted the term, i.e. caused its delete-variants to be
    /// posted; accumulating onto an existing or still-pending term returns
    /// `false`, as does a non-positive count.
    pub fn insert(&mut self, key: &str, count: i64) -> bool {
        if count <= 0 {
            return false;
        }

        let mut count = count;

        if let Some(&buffered) = self.pending.get(key) {
            count = buffered.saturating_add(count);
            if count >= self.count_threshold {
                self.pending.remove(key);
            } else {
                self.pending.insert(key.to_string(), count);
                return false;
            }
        } else {
            match self.store.get_frequency(key) {
                Ok(Some(existing)) => {
                    // Already posted: only the frequency moves.
                    count = existing.saturating_add(count);
                    if let Err(err) = self.store.put_frequency(key, count) {
                        debug!(term = key, error = %err, "frequency update dropped");
                    }
                    return false;
                }
                Ok(None) => {
                    if count < self.count_threshold {
                        self.pending.insert(key.to_string(), count);
                        return false;
                    }
                }
                Err(err) => {
                    // Degraded read: treat as absent rather than failing
                    // the insert.
                    debug!(term = key, error = %err, "frequency read failed during insert");
                    if count < self.count_threshold {
                        self.pending.insert(key.to_string(), count);
                        return false;
                    }
                }
            }
        }

        self.post_term(key, count)
    }

    /// Persist `key` at `count` and post all delete-variants of its prefix.
    fn post_term(&mut self, key: &str, count: i64) -> bool {
        if let Err(err) = self.store.put_frequency(key, count) {
            debug!(term = key, error = %err, "promotion dropped: frequency write failed");
            return false;
        }

        if key.len() > self.max_word_length {
            self.max_word_length = key.len();
        }

        for variant in prefix_deletes(key, self.max_edit_distance, self.prefix_length) {
            if let Err(err) = self.store.add_delete(fingerprint(&variant), key) {
                debug!(term = key, error = %err, "posting dropped");
            }
        }

        true
    }

    /// Look up `input` within the index's configured maximum edit distance.
    ///
    /// See [`lookup_within`](Self::lookup_within).
    pub fn lookup(&self, input: &str, verbosity: Verbosity) -> Vec<Suggestion> {
        self.lookup_within(input, verbosity, self.max_edit_distance)
    }

    /// Look up `input` within `max_distance` edits (clamped to the index's
    /// configured maximum).
    ///
    /// Returns matching terms with their distances and frequencies. For
    /// [`Verbosity::Top`] and [`Verbosity::Closest`] the result is sorted
    /// by ascending distance, then descending frequency; for
    /// [`Verbosity::All`] every match within the bound is returned in
    /// discovery order.
    ///
    /// Lookup never fails: a degraded store yields fewer suggestions, not
    /// an error.
    pub fn lookup_within(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_distance: usize,
    ) -> Vec<Suggestion> {
        let max_distance = max_distance.min(self.max_edit_distance);
        let mut suggestions: Vec<Suggestion> = Vec::new();

        if input.is_empty() {
            return suggestions;
        }

        let input_len = input.len();

        // No dictionary word can be reached if the input is too long for
        // even the longest stored term. A zero hint (nothing inserted yet
        // through this index) disables the check.
        if self.max_word_length > 0
            && input_len.saturating_sub(max_distance) > self.max_word_length
        {
            return suggestions;
        }

        if let Some(frequency) = self.frequency_of(input) {
            suggestions.push(Suggestion::new(input, 0, frequency));
            if verbosity != Verbosity::All {
                return suggestions;
            }
        }

        if max_distance == 0 {
            return suggestions;
        }

        let mut considered_deletes: FxHashSet<Vec<u8>> = FxHashSet::default();
        let mut considered_suggestions: FxHashSet<String> = FxHashSet::default();
        considered_suggestions.insert(input.to_string());

        // Shrinks as better matches are found (Top/Closest only).
        let mut current_max = max_distance;

        let input_prefix_len = input_len.min(self.prefix_length);
        let mut candidates: Vec<Vec<u8>> = vec![input.as_bytes()[..input_prefix_len].to_vec()];

        // The queue is append-only with an advancing read position; popping
        // from the front would invalidate the candidate ordering that the
        // early-exit below relies on.
        let mut position = 0;
        while position < candidates.len() {
            // Clone out: the queue may reallocate while this candidate's
            // deletions are appended.
            let candidate = candidates[position].clone();
            position += 1;

            let candidate_len = candidate.len();
            let length_diff = input_prefix_len - candidate_len;

            if length_diff > current_max {
                // Candidates are enqueued in order of decreasing length, so
                // no later candidate can do better; only All, which never
                // shrinks the bound, keeps scanning.
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            for posted in self.terms_under(&candidate) {
                if posted == input {
                    continue;
                }

                let posted_len = posted.len();

                if posted_len.abs_diff(input_len) > current_max {
                    continue;
                }
                // A posted term shorter than the candidate cannot contain
                // it as a delete; equal length means it must be the
                // candidate itself.
                if posted_len < candidate_len {
                    continue;
                }
                if posted_len == candidate_len && posted.as_bytes() != candidate.as_slice() {
                    continue;
                }

                let posted_prefix_len = posted_len.min(self.prefix_length);
                if posted_prefix_len > input_prefix_len
                    && posted_prefix_len - candidate_len > current_max
                {
                    continue;
                }

                if !delete_in_posted_prefix(&candidate, posted.as_bytes()) {
                    continue;
                }

                if !considered_suggestions.insert(posted.clone()) {
                    continue;
                }

                let distance = bounded_osa_distance(input, &posted, current_max);
                if distance > current_max {
                    continue;
                }

                let frequency = self.frequency_of(&posted).unwrap_or(0);

                match verbosity {
                    Verbosity::Top => {
                        if let Some(best) = suggestions.first_mut() {
                            if distance < current_max
                                || (distance == current_max && frequency > best.frequency)
                            {
                                current_max = distance;
                                *best = Suggestion::new(posted, distance, frequency);
                            }
                        } else {
                            current_max = distance;
                            suggestions.push(Suggestion::new(posted, distance, frequency));
                        }
                    }
                    Verbosity::Closest => {
                        if distance < current_max {
                            suggestions.clear();
                            current_max = distance;
                            suggestions.push(Suggestion::new(posted, distance, frequency));
                        } else if distance == current_max {
                            suggestions.push(Suggestion::new(posted, distance, frequency));
                        }
                    }
                    Verbosity::All => {
                        suggestions.push(Suggestion::new(posted, distance, frequency));
                    }
                }
            }

            // Expand this candidate's own deletions, depth-bounded by the
            // configured maximum (not the shrunken bound).
            if length_diff < self.max_edit_distance && candidate_len <= self.prefix_length {
                if verbosity != Verbosity::All && length_diff >= current_max {
                    continue;
                }

                for i in 0..candidate_len {
                    let mut variant = candidate.clone();
                    variant.remove(i);

                    if considered_deletes.insert(variant.clone()) {
                        candidates.push(variant);
                    }
                }
            }
        }

        if verbosity != Verbosity::All && !suggestions.is_empty() {
            suggestions.sort_by(|a, b| {
                a.distance
                    .cmp(&b.distance)
                    .then_with(|| b.frequency.cmp(&a.frequency))
            });

            if verbosity == Verbosity::Closest {
                let best = suggestions[0].distance;
                suggestions.retain(|s| s.distance == best);
            }
        }

        suggestions
    }

    /// Force-promote every buffered below-threshold term.
    ///
    /// The pending buffer is otherwise discarded when the index is dropped.
    /// Returns the number of terms promoted.
    pub fn flush_pending(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let mut promoted = 0;
        for (term, count) in pending {
            if self.post_term(&term, count) {
                promoted += 1;
            }
        }
        promoted
    }

    /// Number of terms buffered below the count threshold.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Set the minimum accumulated frequency before a term is posted
    /// (clamped to at least 1). Affects future insertions only.
    pub fn set_count_threshold(&mut self, threshold: i64) {
        self.count_threshold = threshold.max(1);
    }

    /// The minimum accumulated frequency before a term is posted.
    pub fn count_threshold(&self) -> i64 {
        self.count_threshold
    }

    /// The maximum edit distance used for indexing and lookup.
    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// The indexed prefix length.
    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    /// Byte length of the longest term observed by this index, or seeded
    /// from the store at construction. Zero disables length pruning.
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Start a store batch for bulk insertion. Bulk inserts are never
    /// wrapped implicitly; callers batch as they see fit.
    pub fn begin_transaction(&mut self) -> store::Result<()> {
        self.store.begin_transaction()
    }

    /// Commit the open store batch.
    pub fn commit(&mut self) -> store::Result<()> {
        self.store.commit()
    }

    /// Abandon the open store batch.
    pub fn rollback(&mut self) -> store::Result<()> {
        self.store.rollback()
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Extract the underlying store, consuming the index.
    pub fn into_store(self) -> S {
        self.store
    }

    fn frequency_of(&self, term: &str) -> Option<i64> {
        match self.store.get_frequency(term) {
            Ok(frequency) => frequency,
            Err(err) => {
                debug!(term, error = %err, "frequency read failed, treating as absent");
                None
            }
        }
    }

    fn terms_under(&self, variant: &[u8]) -> Vec<String> {
        match self.store.terms_for(fingerprint(variant)) {
            Ok(terms) => terms,
            Err(err) => {
                debug!(error = %err, "postings read failed, treating as empty");
                Vec::new()
            }
        }
    }
}

/// Check that every byte of `candidate` appears, in order, within the
/// leading bytes of `posted`.
///
/// The window is a literal 7 bytes regardless of the configured prefix
/// length; compatible dictionaries were built with this exact prefilter and
/// widening it changes recall.
fn delete_in_posted_prefix(candidate: &[u8], posted: &[u8]) -> bool {
    if candidate.is_empty() {
        return true;
    }

    let window = &posted[..posted.len().min(7)];
    let mut j = 0;

    for &byte in candidate {
        while j < window.len() && byte != window[j] {
            j += 1;
        }
        if j == window.len() {
            return false;
        }
    }

    true
}
