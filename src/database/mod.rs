//! LinkSaver database layer.
//!
//! SQLite connection management plus versioned schema migrations.
//!
//! ```no_run
//! use linksaver::database::Database;
//!
//! let db = Database::open("linksaver.db").expect("failed to open database");
//! let scratch = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = scratch.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
