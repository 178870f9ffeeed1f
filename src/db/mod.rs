pub mod migrations;
pub mod storage;

use anyhow::Context;
use rusqlite::Connection;

pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open local storage")?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .context("failed to set local storage pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
