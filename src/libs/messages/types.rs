/// Every user-facing message the application prints or renders.
///
/// Text lives in the `Display` impl in `display.rs`; callers only pick a
/// variant and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskMarkedDone(i64),
    TasksNotFound,
    NoChangesDetected,
    TasksSeeded(usize),
    SeedSkipped,
    TaskListPage { shown: usize, total: usize },

    // === VALIDATION MESSAGES ===
    DescriptionRequired,
    InvalidPriority(String),
    InvalidDueDate(String),
    InvalidStatus(String),

    // === STORE MESSAGES ===
    StoreOpened(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === CONFIGURATION MESSAGES ===
    InvalidPort(String),

    // === SERVER MESSAGES ===
    ServerListening(String),
    ServerStopped,
    ShutdownSignalUnavailable(String),
    RequestFailed(String),
}
