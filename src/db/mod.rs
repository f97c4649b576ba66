/// Key-value storage on top of SQLite, plus the fixed key names.
pub mod keys;
mod kv;
mod migrations;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rusqlite::Connection;

pub use kv::{get, get_json, remove, set, set_json};

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    migrations::run_migrations(&conn)?;
    tracing::debug!(path = %db_path.display(), "database ready");
    Ok(conn)
}

/// Opens a throwaway in-memory store with the schema applied.
#[cfg(test)]
pub fn init_in_memory() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory database should open");
    migrations::run_migrations(&conn).expect("migrations should run on a fresh database");
    conn
}

/// Returns the directory holding the database and the log file.
/// Falls back to the working directory when no data dir is found.
pub fn default_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join("staystrong");
        std::fs::create_dir_all(&app_dir).ok();
        app_dir
    } else {
        PathBuf::from(".")
    }
}

/// Returns the default database path inside the user's data directory.
pub fn default_db_path() -> PathBuf {
    default_data_dir().join("staystrong.db")
}
