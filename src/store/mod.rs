//! Storage abstractions for pluggable index backends.
//!
//! The index reads and writes two relations through the [`Store`] trait:
//! term frequencies and delete postings (fingerprint → term). The trait
//! allows different backends to be used interchangeably:
//!
//! - [`MemoryStore`](memory::MemoryStore): in-process hash maps; never
//!   fails, transactions are no-ops. The default choice for dictionaries
//!   built fresh each run.
//! - [`SqliteStore`](sqlite::SqliteStore): a relational realization over a
//!   borrowed SQLite connection (requires the `sqlite-backend` feature).
//!   Use it when the dictionary must survive the process.
//!
//! Backends are not required to be thread-safe; a store has a single
//! writer, and callers serialize access around writes.

pub mod memory;

#[cfg(feature = "sqlite-backend")]
pub mod sqlite;

pub use memory::MemoryStore;

#[cfg(feature = "sqlite-backend")]
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors produced by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be brought up: schema creation or statement
    /// preparation failed. Fatal at construction; not retried.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A row-level read or write failed during normal operation. The index
    /// degrades (empty postings, dropped writes) rather than failing the
    /// whole lookup or insert.
    #[cfg(feature = "sqlite-backend")]
    #[error("storage operation failed")]
    Database(#[from] rusqlite::Error),
}

/// A specialized `Result` type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence surface for term frequencies and delete postings.
///
/// Implementations must keep [`fingerprint`](crate::fingerprint::fingerprint)
/// values stable across processes: the posting key written by one process is
/// probed verbatim by the next.
pub trait Store {
    /// Record a posting (fingerprint → term). Duplicate postings are
    /// tolerated; they must not surface as duplicate suggestions.
    fn add_delete(&mut self, fingerprint: i32, term: &str) -> Result<()>;

    /// All terms posted under `fingerprint`. Order is unspecified but
    /// stable within a single call.
    fn terms_for(&self, fingerprint: i32) -> Result<Vec<String>>;

    /// Set the absolute frequency of `term`, creating it if absent.
    ///
    /// This is a plain SET on every backend; accumulation (and saturation)
    /// is the index's job.
    fn put_frequency(&mut self, term: &str, frequency: i64) -> Result<()>;

    /// The frequency of `term`, or `None` if it has never been promoted.
    fn get_frequency(&self, term: &str) -> Result<Option<i64>>;

    /// Whether `term` has ever been promoted.
    fn term_exists(&self, term: &str) -> Result<bool> {
        Ok(self.get_frequency(term)?.is_some())
    }

    /// Byte length of the longest stored term, if the backend can answer
    /// cheaply. Seeds the index's length-based early exit when an existing
    /// dictionary is reopened.
    fn max_term_length(&self) -> Result<Option<usize>> {
        Ok(None)
    }

    /// Start a batch. Idempotent; a no-op for backends without durability.
    fn begin_transaction(&mut self) -> Result<()> {
        Ok(())
    }

    /// Commit the open batch. Implementations roll back on failure.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    /// Abandon the open batch.
    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }
}
