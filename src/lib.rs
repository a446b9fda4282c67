//! # Tasktrack
//!
//! A personal task tracker: a prioritized list of tasks with due dates,
//! statuses, comments and colors, kept in a local SQLite file and reachable
//! from the command line or a small server-rendered web page.
//!
//! ## Features
//!
//! - **Task Store**: filtering, sorting and pagination done in SQL
//! - **Schema Upgrades**: older store files are migrated in place on open
//! - **Command Line**: add, list, edit, complete, delete and seed tasks
//! - **Web Front End**: the same operations through HTML forms
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktrack::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod web;

#[doc(hidden)]
pub use anyhow;
#[doc(hidden)]
pub use tracing;
