//! Database module
//!
//! Handles SQLite connection and migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};

/// Open a database and bring its schema up to date
pub fn open_migrated<P: AsRef<std::path::Path>>(path: P) -> DbResult<Database> {
    let database = Database::new(path)?;
    database.with_conn(migrations::run_migrations)?;
    Ok(database)
}

/// In-memory database with the current schema
pub fn in_memory_migrated() -> DbResult<Database> {
    let database = Database::in_memory()?;
    database.with_conn(migrations::run_migrations)?;
    Ok(database)
}
