//! Versioned schema migrations for the task store.
//!
//! Migrations form an ordered list of additive steps. Applied versions are
//! recorded in a `migrations` table, and every step is written to be safe on
//! a store that already has some of its columns: stores created before the
//! `migrations` table existed start at version 0 and are upgraded in place
//! without losing rows.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktrack::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("tasks.db").unwrap();
//! init_with_migrations(&mut conn).unwrap();
//! let version = get_db_version(&conn).unwrap();
//! ```

use crate::libs::error::Result;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use rusqlite::{params, Connection, Transaction};

/// Bookkeeping table holding one row per applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    /// Unique, increasing version number
    version: u32,
    /// Short name recorded in the history table
    name: &'static str,
    /// Applies the change inside the migration transaction
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Registry of every known migration, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers the schema history. New steps go at the end with the next
    /// version number; existing steps must never change.
    fn register_migrations(&mut self) {
        // Version 1: the original table. Stores created before versioning
        // already have it, hence IF NOT EXISTS.
        self.add_migration(1, "create_tasks_table", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    description TEXT NOT NULL,
                    priority INTEGER NOT NULL DEFAULT 1,
                    done INTEGER NOT NULL DEFAULT 0
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: optional due date stored as YYYY-MM-DD text
        self.add_migration(2, "add_due_date", |tx| {
            add_column_if_missing(tx, "tasks", "due_date", "TEXT")?;
            Ok(())
        });

        // Version 3: explicit status. Rows already marked done become "done";
        // everything else keeps the column default.
        self.add_migration(3, "add_status", |tx| {
            if add_column_if_missing(tx, "tasks", "status", "TEXT NOT NULL DEFAULT 'not started'")? {
                tx.execute("UPDATE tasks SET status = 'done' WHERE done = 1", [])?;
            }
            tx.execute(
                "UPDATE tasks
                 SET status = CASE WHEN done = 1 THEN 'done' ELSE 'not started' END
                 WHERE status IS NULL OR status = ''",
                [],
            )?;
            Ok(())
        });

        // Version 4: free-form annotation and display color
        self.add_migration(4, "add_comment_and_color", |tx| {
            add_column_if_missing(tx, "tasks", "comment", "TEXT")?;
            add_column_if_missing(tx, "tasks", "color", "TEXT")?;
            Ok(())
        });

        // Version 5: indices backing the list filters and sort keys
        self.add_migration(5, "add_task_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_done ON tasks(done)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(priority)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date)", [])?;
            Ok(())
        });

        // Version 6: older front ends stored due dates as free text. Anything
        // that is not a canonical YYYY-MM-DD date becomes "no due date".
        self.add_migration(6, "normalize_due_dates", |tx| {
            tx.execute(
                "UPDATE tasks SET due_date = NULL
                 WHERE due_date IS NOT NULL AND date(due_date) IS NOT due_date",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Highest registered version.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every pending migration.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        self.run_up_to(conn, self.latest_version())
    }

    /// Applies pending migrations up to and including `target_version`.
    ///
    /// All steps run in one transaction; a failing step rolls back the whole
    /// batch and leaves the store at its previous version.
    pub fn run_up_to(&self, conn: &mut Connection, target_version: u32) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self
            .migrations
            .iter()
            .filter(|m| m.version > current_version && m.version <= target_version)
            .collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e.into());
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            msg_debug!(Message::MigrationCompleted(migration.version));
        }
        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let tracked: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations')",
            [],
            |row| row.get(0),
        )?;
        if !tracked {
            return Ok(0);
        }

        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(history)
    }
}

/// Adds `column` to `table` unless it is already there. Returns whether the
/// column was added.
fn add_column_if_missing(tx: &Transaction, table: &str, column: &str, definition: &str) -> rusqlite::Result<bool> {
    if column_exists(tx, table, column)? {
        return Ok(false);
    }
    tx.execute(&format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition), [])?;
    Ok(true)
}

/// Column names come from `PRAGMA table_info`; `table` is always a
/// compile-time constant here.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Brings `conn` to the latest schema.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Current schema version (0 for an unversioned store).
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

/// Whether `conn` is behind the latest registered migration.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
