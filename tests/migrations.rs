#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rusqlite::{params, Connection};
    use std::path::PathBuf;
    use tasktrack::db::db::Db;
    use tasktrack::db::migrations::{column_exists, get_db_version, needs_migration, MigrationManager};
    use tasktrack::db::tasks::Tasks;
    use tasktrack::libs::task::{TaskQuery, TaskStatus};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("tasks.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    /// A store as written before schema versioning: no migrations table and
    /// only the original four columns.
    fn create_unversioned_store(path: &PathBuf) {
        let conn = Connection::open(path).unwrap();
        conn.execute(
            "CREATE TABLE tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 1,
                done INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO tasks (description, priority, done) VALUES (?1, ?2, ?3)",
            params!["Old open task", 4, 0],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO tasks (description, priority, done) VALUES (?1, ?2, ?3)",
            params!["Old finished task", 2, 1],
        )
        .unwrap();
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_store_is_at_latest_version(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        assert_eq!(get_db_version(&db.conn).unwrap(), manager.latest_version());
        assert!(!needs_migration(&db.conn).unwrap());
        for column in ["due_date", "status", "comment", "color"] {
            assert!(column_exists(&db.conn, "tasks", column).unwrap(), "missing column {}", column);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_unversioned_store_is_upgraded_in_place(ctx: &mut MigrationTestContext) {
        create_unversioned_store(&ctx.db_path);

        let conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
        drop(conn);

        let tasks = Tasks::open(&ctx.db_path).unwrap();
        let all = tasks.list(&TaskQuery::new().show_all(true)).unwrap();
        assert_eq!(all.len(), 2);

        let open = &all[0];
        assert_eq!(open.description, "Old open task");
        assert_eq!(open.priority, 4);
        assert_eq!(open.due_date, None);
        assert_eq!(open.status, Some(TaskStatus::NotStarted));
        assert!(!open.done);

        let finished = &all[1];
        assert_eq!(finished.description, "Old finished task");
        assert_eq!(finished.status, Some(TaskStatus::Done));
        assert!(finished.done);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_partial_store_is_upgraded(ctx: &mut MigrationTestContext) {
        let manager = MigrationManager::new();
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        manager.run_up_to(&mut conn, 2).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 2);
        assert!(column_exists(&conn, "tasks", "due_date").unwrap());
        assert!(!column_exists(&conn, "tasks", "status").unwrap());

        conn.execute(
            "INSERT INTO tasks (description, priority, due_date, done) VALUES ('Dated', 3, '2024-05-01', 1)",
            [],
        )
        .unwrap();

        manager.run_migrations(&mut conn).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), manager.latest_version());

        let status: String = conn
            .query_row("SELECT status FROM tasks WHERE description = 'Dated'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(status, "done");
        let due: String = conn
            .query_row("SELECT due_date FROM tasks WHERE description = 'Dated'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(due, "2024-05-01");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_are_idempotent(ctx: &mut MigrationTestContext) {
        let manager = MigrationManager::new();
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();

        manager.run_migrations(&mut conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        assert_eq!(history.len() as u32, manager.latest_version());
        drop(conn);

        // Reopening through the store handle must not re-run anything.
        Tasks::open(&ctx.db_path).unwrap();
        Tasks::open(&ctx.db_path).unwrap();
        let conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        assert_eq!(manager.get_migration_history(&conn).unwrap().len(), history.len());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history_is_ordered(ctx: &mut MigrationTestContext) {
        let manager = MigrationManager::new();
        let db = Db::open(&ctx.db_path).unwrap();

        let history = manager.get_migration_history(&db.conn).unwrap();
        let versions: Vec<u32> = history.iter().map(|(version, _, _)| *version).collect();
        assert_eq!(versions, (1..=manager.latest_version()).collect::<Vec<u32>>());
        assert_eq!(history[0].1, "create_tasks_table");
        assert!(history.iter().all(|(_, _, applied_at)| !applied_at.is_empty()));

        assert!(manager.is_migration_applied(&db.conn, 1).unwrap());
        assert!(!manager.is_migration_applied(&db.conn, manager.latest_version() + 1).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_store_with_columns_but_no_history(ctx: &mut MigrationTestContext) {
        // Later unversioned stores already had every column.
        let conn = Connection::open(&ctx.db_path).unwrap();
        conn.execute(
            "CREATE TABLE tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 1,
                due_date TEXT,
                done INTEGER NOT NULL DEFAULT 0,
                status TEXT,
                comment TEXT,
                color TEXT
            )",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO tasks (description, priority, done, status, color) VALUES ('Half-migrated', 1, 1, NULL, 'red')",
            [],
        )
        .unwrap();
        drop(conn);

        let tasks = Tasks::open(&ctx.db_path).unwrap();
        let all = tasks.list(&TaskQuery::new().show_all(true)).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, Some(TaskStatus::Done));
        assert_eq!(all[0].color.as_deref(), Some("red"));
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_malformed_due_dates_are_cleared(ctx: &mut MigrationTestContext) {
        let conn = Connection::open(&ctx.db_path).unwrap();
        conn.execute(
            "CREATE TABLE tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 1,
                due_date TEXT,
                done INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )
        .unwrap();
        for (description, due_date) in [("ok", "2024-05-01"), ("legacy", ""), ("typed by hand", "May 1st")] {
            conn.execute(
                "INSERT INTO tasks (description, due_date) VALUES (?1, ?2)",
                params![description, due_date],
            )
            .unwrap();
        }
        drop(conn);

        let tasks = Tasks::open(&ctx.db_path).unwrap();
        let all = tasks.list(&TaskQuery::new().show_all(true)).unwrap();
        assert_eq!(all.len(), 3);

        let due = |description: &str| all.iter().find(|t| t.description == description).unwrap().due_date;
        assert_eq!(due("ok"), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(due("legacy"), None);
        assert_eq!(due("typed by hand"), None);
        assert!(tasks.get(2).is_ok());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_due_date_step_runs_on_indexed_store(ctx: &mut MigrationTestContext) {
        let manager = MigrationManager::new();
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        manager.run_up_to(&mut conn, 5).unwrap();
        conn.execute("INSERT INTO tasks (description, due_date) VALUES ('blank', '')", [])
            .unwrap();

        manager.run_migrations(&mut conn).unwrap();

        let due: Option<String> = conn
            .query_row("SELECT due_date FROM tasks WHERE description = 'blank'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(due, None);
        assert!(manager.is_migration_applied(&conn, 6).unwrap());
    }
}
