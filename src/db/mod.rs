//! SQLite persistence for tasks.
//!
//! The store is a single `tasks` table plus a `migrations` bookkeeping
//! table. Opening a store always brings its schema up to date, so older
//! files keep working after an upgrade.
//!
//! ```rust,no_run
//! use tasktrack::db::tasks::Tasks;
//! use tasktrack::libs::task::TaskQuery;
//!
//! let mut tasks = Tasks::open_in_memory().unwrap();
//! tasks.seed_if_empty().unwrap();
//! let total = tasks.count(&TaskQuery::new().show_all(true)).unwrap();
//! ```

/// Connection setup and schema initialization.
pub mod db;

/// Ordered, versioned schema migrations.
pub mod migrations;

/// Task CRUD with filtering, sorting and pagination.
pub mod tasks;
