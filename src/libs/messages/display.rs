//! Display implementation for application messages.
//!
//! All user-facing text is defined here, in one match, so the CLI output,
//! the web pages and the error types stay worded consistently.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task [{}] created", id),
            Message::TaskUpdated(id) => format!("Task [{}] updated", id),
            Message::TaskDeleted(id) => format!("Task [{}] deleted", id),
            Message::TaskMarkedDone(id) => format!("Task [{}] marked as done", id),
            Message::TasksNotFound => "No tasks found".to_string(),
            Message::NoChangesDetected => "No changes detected".to_string(),
            Message::TasksSeeded(count) => format!("Added {} sample tasks", count),
            Message::SeedSkipped => "Store already has tasks, nothing to seed".to_string(),
            Message::TaskListPage { shown, total } => format!("Showing {} of {} tasks", shown, total),

            // === VALIDATION MESSAGES ===
            Message::DescriptionRequired => "Task description must not be empty".to_string(),
            Message::InvalidPriority(value) => format!("Priority must be an integer, got '{}'", value),
            Message::InvalidDueDate(value) => format!("Due date must be in YYYY-MM-DD format, got '{}'", value),
            Message::InvalidStatus(value) => {
                format!("Unknown status '{}'. Expected one of: not started, in progress, done", value)
            }

            // === STORE MESSAGES ===
            Message::StoreOpened(path) => format!("Opened task store at {}", path),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::InvalidPort(value) => format!("PORT must be a number between 0 and 65535, got '{}'", value),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Task tracker web UI: http://{}", addr),
            Message::ServerStopped => "Web server stopped".to_string(),
            Message::ShutdownSignalUnavailable(error) => {
                format!("Cannot listen for Ctrl-C ({}); stop the server by terminating the process", error)
            }
            Message::RequestFailed(error) => format!("Request failed: {}", error),
        };
        write!(f, "{}", s)
    }
}
