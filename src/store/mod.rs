// src/store/mod.rs — Session persistence

pub mod schema;
#[allow(clippy::module_inception)]
pub mod store;
pub mod store_server;

use rusqlite::Connection;
use std::path::Path;

pub use store::{MessageRow, Store};
pub use store_server::{spawn_store_server, StoreHandle};

/// Open (or create) the database at the given path.
pub fn open(path: &Path) -> anyhow::Result<Store> {
    let conn = Connection::open(path)?;
    // WAL for better concurrent read performance
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    schema::run_migrations(&conn)?;

    Ok(Store::new(conn))
}

/// Create an in-memory database (for testing).
pub fn in_memory() -> anyhow::Result<Store> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    schema::run_migrations(&conn)?;
    Ok(Store::new(conn))
}
