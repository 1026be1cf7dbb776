//! SQLite connection wrapper.
//!
//! [`Database`] owns a `rusqlite::Connection` and brings the schema up to
//! date every time it is opened.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Owned SQLite connection with the link schema applied.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and runs pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Opens a throwaway in-memory database. Everything is lost on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
