//! SQLite-backed store for persistent dictionaries.
//!
//! The store borrows an already-opened [`rusqlite::Connection`]; the
//! connection's lifecycle (path, pragmas, closing) belongs to the caller.
//! Call [`SqliteStore::initialize`] once per database to create the schema,
//! then construct the store. All statements are prepared through the
//! connection's statement cache, so each is compiled once and reused across
//! calls.
//!
//! A single store instance must not be shared across threads: the cached
//! statements carry per-connection state.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::store::{Result, Store, StoreError};

// Postings cluster on (delete_hash, term_id); the hash index serves the
// lookup probe, the term index serves frequency reads.
const CREATE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS symspell_terms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        term TEXT UNIQUE NOT NULL,
        frequency INTEGER DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS symspell_deletes (
        delete_hash INTEGER NOT NULL,
        term_id INTEGER NOT NULL,
        FOREIGN KEY (term_id) REFERENCES symspell_terms(id) ON DELETE CASCADE,
        PRIMARY KEY (delete_hash, term_id)
    ) WITHOUT ROWID;

    CREATE INDEX IF NOT EXISTS idx_symspell_terms_term ON symspell_terms(term);

    CREATE INDEX IF NOT EXISTS idx_symspell_deletes_hash ON symspell_deletes(delete_hash);
";

const PUT_FREQUENCY: &str = "
    INSERT INTO symspell_terms (term, frequency) VALUES (?1, ?2)
    ON CONFLICT(term) DO UPDATE SET frequency = excluded.frequency
";

const ADD_DELETE: &str = "
    INSERT OR IGNORE INTO symspell_deletes (delete_hash, term_id)
    VALUES (?1, (SELECT id FROM symspell_terms WHERE term = ?2))
";

const GET_TERMS: &str = "
    SELECT t.term FROM symspell_terms t
    INNER JOIN symspell_deletes d ON t.id = d.term_id
    WHERE d.delete_hash = ?1
";

const GET_FREQUENCY: &str = "
    SELECT frequency FROM symspell_terms WHERE term = ?1
";

const TERM_EXISTS: &str = "
    SELECT 1 FROM symspell_terms WHERE term = ?1 LIMIT 1
";

// LENGTH() on TEXT counts characters; the BLOB cast makes it count bytes,
// which is the unit the index's length pruning uses.
const MAX_TERM_LENGTH: &str = "
    SELECT MAX(LENGTH(CAST(term AS BLOB))) FROM symspell_terms
";

/// Relational realization of [`Store`] over a borrowed SQLite connection.
///
/// # Example
///
/// ```rust
/// use rusqlite::Connection;
/// use symdex::store::sqlite::SqliteStore;
/// use symdex::store::Store;
///
/// let conn = Connection::open_in_memory().unwrap();
/// SqliteStore::initialize(&conn).unwrap();
///
/// let mut store = SqliteStore::new(&conn).unwrap();
/// store.put_frequency("hello", 100).unwrap();
/// assert_eq!(store.get_frequency("hello").unwrap(), Some(100));
/// ```
#[derive(Debug)]
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
    in_transaction: bool,
}

impl<'conn> SqliteStore<'conn> {
    /// Create the tables and indexes if they do not exist yet.
    ///
    /// Separate from [`SqliteStore::new`] so that read-only consumers of an
    /// existing dictionary never issue DDL.
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute_batch(CREATE_SCHEMA)
            .map_err(|err| StoreError::Unavailable(format!("failed to create schema: {err}")))
    }

    /// Construct a store over `conn`.
    ///
    /// Every statement is compiled here so that an unusable database (wrong
    /// schema, missing tables) fails construction instead of degrading
    /// every later operation.
    pub fn new(conn: &'conn Connection) -> Result<Self> {
        for sql in [
            PUT_FREQUENCY,
            ADD_DELETE,
            GET_TERMS,
            GET_FREQUENCY,
            TERM_EXISTS,
            MAX_TERM_LENGTH,
        ] {
            conn.prepare_cached(sql).map_err(|err| {
                StoreError::Unavailable(format!("failed to prepare statement: {err}"))
            })?;
        }

        Ok(SqliteStore {
            conn,
            in_transaction: false,
        })
    }
}

impl Store for SqliteStore<'_> {
    fn add_delete(&mut self, fingerprint: i32, term: &str) -> Result<()> {
        // OR IGNORE gives set semantics on the composite key; it also skips
        // the row when the term has no id yet.
        let mut stmt = self.conn.prepare_cached(ADD_DELETE)?;
        stmt.execute(params![fingerprint, term])?;
        Ok(())
    }

    fn terms_for(&self, fingerprint: i32) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(GET_TERMS)?;
        let rows = stmt.query_map(params![fingerprint], |row| row.get::<_, String>(0))?;
        let mut terms = Vec::new();
        for term in rows {
            terms.push(term?);
        }
        Ok(terms)
    }

    fn put_frequency(&mut self, term: &str, frequency: i64) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(PUT_FREQUENCY)?;
        stmt.execute(params![term, frequency])?;
        Ok(())
    }

    fn get_frequency(&self, term: &str) -> Result<Option<i64>> {
        let mut stmt = self.conn.prepare_cached(GET_FREQUENCY)?;
        let frequency = stmt
            .query_row(params![term], |row| row.get::<_, i64>(0))
            .optional()?;
        Ok(frequency)
    }

    fn term_exists(&self, term: &str) -> Result<bool> {
        let mut stmt = self.conn.prepare_cached(TERM_EXISTS)?;
        let row = stmt.query_row(params![term], |_| Ok(())).optional()?;
        Ok(row.is_some())
    }

    fn max_term_length(&self) -> Result<Option<usize>> {
        let mut stmt = self.conn.prepare_cached(MAX_TERM_LENGTH)?;
        let max: Option<i64> = stmt.query_row([], |row| row.get(0))?;
        Ok(max.map(|len| len as usize))
    }

    fn begin_transaction(&mut self) -> Result<()> {
        if !self.in_transaction {
            self.conn.execute_batch("BEGIN TRANSACTION")?;
            self.in_transaction = true;
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.in_transaction {
            self.in_transaction = false;
            if let Err(err) = self.conn.execute_batch("COMMIT") {
                warn!(error = %err, "failed to commit transaction, rolling back");
                let _ = self.conn.execute_batch("ROLLBACK");
                return Err(err.into());
            }
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if self.in_transaction {
            self.in_transaction = false;
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }
}
