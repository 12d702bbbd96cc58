//! SQLite persistence layer for the durable store.
//!
//! RULE: Only the store talks to the database.
//! Pools, the link registry and the driver call store methods;
//! they never execute SQL directly.
//!
//! Table and column names always come from `Record`/`LinkSpec` constants,
//! never from user input, so they are safe to splice into SQL text.

use crate::error::SimResult;
use rusqlite::Connection;

mod counters;
mod links;
mod records;

pub use records::Row;

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order. Every statement is
    /// `CREATE TABLE IF NOT EXISTS`, so running this twice is harmless.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_retail.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_manufacturing.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/004_education.sql"))?;
        Ok(())
    }

    /// Count rows in `table`.
    pub fn row_count(&self, table: &str) -> SimResult<i64> {
        let n = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(n)
    }
}
