//! # symdex
//!
//! Fuzzy string matching and spelling correction via symmetric-delete
//! indexing.
//!
//! Dictionary terms are indexed under 32-bit fingerprints of the
//! delete-variants of their prefixes. A lookup expands the query by the same
//! delete operation, intersects the candidates against the inverted index,
//! and verifies survivors with a bounded Damerau-Levenshtein (optimal string
//! alignment) distance. Because only deletions are materialized, index size
//! and lookup cost stay small even at edit distance 2; the approach is the
//! Symmetric Delete spelling correction algorithm:
//!
//! > Garbe, Wolf. "1000x faster spelling correction." (2012).
//!
//! The same index runs over an in-memory store or a SQLite-backed store
//! (enable the `sqlite-backend` feature) with identical lookup semantics.
//!
//! ## Example
//!
//! ```rust
//! use symdex::prelude::*;
//!
//! let mut index = SymSpell::new(MemoryStore::new());
//! index.insert("hello", 1000);
//! index.insert("world", 500);
//!
//! let suggestions = index.lookup("hellp", Verbosity::Closest);
//! assert_eq!(suggestions[0].term, "hello");
//! assert_eq!(suggestions[0].distance, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod edits;
pub mod fingerprint;
pub mod index;
pub mod store;
pub mod suggestion;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::index::SymSpell;
    pub use crate::store::memory::MemoryStore;
    pub use crate::store::Store;
    pub use crate::suggestion::{Suggestion, Verbosity};

    #[cfg(feature = "sqlite-backend")]
    pub use crate::store::sqlite::SqliteStore;
}
