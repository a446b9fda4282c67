use super::migrations::init_with_migrations;
use crate::libs::error::Result;
use crate::libs::messages::Message;
use crate::msg_debug;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Default store file, relative to the working directory.
pub const DB_FILE_NAME: &str = "tasks.db";

/// How long a writer waits on a lock held by another process before SQLite
/// reports `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (or creates) the store at `path` and applies pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Self::open_without_migrations(&path)?;
        init_with_migrations(&mut conn)?;
        msg_debug!(Message::StoreOpened(path.as_ref().display().to_string()));

        Ok(Db { conn })
    }

    /// Opens a private in-memory store with the current schema.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the store file as-is, leaving the schema untouched.
    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        Ok(conn)
    }
}
