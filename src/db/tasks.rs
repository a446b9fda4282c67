use super::db::Db;
use crate::libs::error::{Result, TaskError};
use crate::libs::messages::Message;
use crate::libs::task::{FieldSelection, SortKey, Task, TaskQuery, TaskStatus, TaskUpdate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

const INSERT_TASK: &str = "INSERT INTO tasks (description, priority, due_date, status, done, comment, color)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const MARK_DONE: &str = "UPDATE tasks SET status = 'done', done = 1 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const BASE_COLUMNS: &str = "id, description, priority, due_date, done";

/// Sample data for a fresh store. The emptiness check and the insert are a
/// single statement, so concurrent seeders cannot both succeed.
const SEED_TASKS: &str = "INSERT INTO tasks (description, priority, due_date, status, done, comment, color)
    SELECT column1, column2, column3, column4, column5, column6, column7 FROM (VALUES
        ('Finish report', 5, '2024-04-20', 'in progress', 0, 'Quarterly numbers are in the shared folder', '#e53935'),
        ('Buy groceries', 2, '2024-05-01', 'not started', 0, 'Milk, eggs, bread', '#43a047'),
        ('Call the plumber', 3, NULL, 'not started', 0, NULL, '#fb8c00'),
        ('Renew library card', 1, NULL, 'done', 1, NULL, NULL)
    )
    WHERE NOT EXISTS (SELECT 1 FROM tasks)";

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|_| FromSqlError::InvalidType)
    }
}

/// Handle to the persistent task table.
///
/// Construct one per process (or per test) and pass it to whoever needs it.
pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    /// Opens or creates the store at `path`, upgrading older schemas.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Tasks> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn open_in_memory() -> Result<Tasks> {
        Ok(Self::from_db(Db::open_in_memory()?))
    }

    pub fn from_db(db: Db) -> Tasks {
        Tasks { conn: db.conn }
    }

    /// Inserts a new task and returns its id. `done` follows the status.
    pub fn add(&mut self, task: &Task) -> Result<i64> {
        let description = validate_description(&task.description)?;
        let status = task.status.unwrap_or_default();

        self.conn.execute(
            INSERT_TASK,
            params![
                description,
                task.priority,
                task.due_date,
                status,
                status.is_done(),
                non_empty(task.comment.as_deref()),
                non_empty(task.color.as_deref()),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Tasks matching `query`, filtered, sorted and paginated in SQL.
    pub fn list(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let (where_clause, mut values) = filter_clause(query);
        let mut sql = format!(
            "SELECT {} FROM tasks{} ORDER BY {}",
            select_columns(&query.fields),
            where_clause,
            order_clause(query)
        );
        if query.limit.is_some() || query.offset.is_some() {
            sql.push_str(" LIMIT ? OFFSET ?");
            // A negative LIMIT means "no limit" in SQLite.
            values.push(Value::Integer(query.limit.map(i64::from).unwrap_or(-1)));
            values.push(Value::Integer(query.offset.map(i64::from).unwrap_or(0)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params_from_iter(values.iter()), |row| row_to_task(row, &query.fields))?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }

        Ok(tasks)
    }

    /// Number of tasks matching the filters of `query`. Sorting, pagination
    /// and field selection are ignored.
    pub fn count(&self, query: &TaskQuery) -> Result<usize> {
        let (where_clause, values) = filter_clause(query);
        let sql = format!("SELECT COUNT(*) FROM tasks{}", where_clause);
        let count: i64 = self.conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;

        Ok(count as usize)
    }

    pub fn get(&self, id: i64) -> Result<Task> {
        let fields = FieldSelection::all();
        let sql = format!("SELECT {} FROM tasks WHERE id = ?1", select_columns(&fields));

        self.conn
            .query_row(&sql, params![id], |row| row_to_task(row, &fields))
            .optional()?
            .ok_or(TaskError::NotFound(id))
    }

    pub fn mark_done(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(MARK_DONE, params![id])?;
        ensure_found(affected, id)
    }

    /// Writes only the supplied fields, in one statement. Supplying a status
    /// also rewrites `done`. An empty update does not touch the store.
    pub fn update(&mut self, id: i64, update: &TaskUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(description) = &update.description {
            assignments.push("description = ?");
            values.push(Value::Text(validate_description(description)?.to_string()));
        }
        if let Some(priority) = update.priority {
            assignments.push("priority = ?");
            values.push(Value::Integer(priority));
        }
        if let Some(due_date) = update.due_date {
            assignments.push("due_date = ?");
            values.push(match due_date {
                Some(date) => Value::Text(date.format("%Y-%m-%d").to_string()),
                None => Value::Null,
            });
        }
        if let Some(status) = update.status {
            assignments.push("status = ?");
            values.push(Value::Text(status.as_str().to_string()));
            assignments.push("done = ?");
            values.push(Value::Integer(status.is_done() as i64));
        }
        if let Some(comment) = &update.comment {
            assignments.push("comment = ?");
            values.push(optional_text(comment));
        }
        if let Some(color) = &update.color {
            assignments.push("color = ?");
            values.push(optional_text(color));
        }
        values.push(Value::Integer(id));

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", assignments.join(", "));
        let affected = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        ensure_found(affected, id)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        ensure_found(affected, id)
    }

    /// Inserts the sample tasks if the table is empty. Returns the number of
    /// rows inserted (0 when the store already had tasks).
    pub fn seed_if_empty(&mut self) -> Result<usize> {
        Ok(self.conn.execute(SEED_TASKS, [])?)
    }
}

fn validate_description(description: &str) -> Result<&str> {
    let description = description.trim();
    if description.is_empty() {
        return Err(TaskError::Validation(Message::DescriptionRequired));
    }
    Ok(description)
}

fn ensure_found(affected: usize, id: i64) -> Result<()> {
    if affected == 0 {
        return Err(TaskError::NotFound(id));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn optional_text(value: &str) -> Value {
    if value.is_empty() {
        Value::Null
    } else {
        Value::Text(value.to_string())
    }
}

fn select_columns(fields: &FieldSelection) -> String {
    let mut columns = String::from(BASE_COLUMNS);
    if fields.status {
        columns.push_str(", status");
    }
    if fields.comment {
        columns.push_str(", comment");
    }
    if fields.color {
        columns.push_str(", color");
    }
    columns
}

/// WHERE clause (with a leading space, or empty) and its bound values.
/// Only fixed fragments are emitted; user text is always a parameter.
fn filter_clause(query: &TaskQuery) -> (String, Vec<Value>) {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if !query.show_all {
        conditions.push("done = 0");
    }
    if let Some(search) = &query.search {
        conditions.push("instr(lower(description), lower(?)) > 0");
        values.push(Value::Text(search.clone()));
    }
    if let Some(status) = query.status {
        conditions.push("status = ?");
        values.push(Value::Text(status.as_str().to_string()));
    }

    if conditions.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), values)
    }
}

/// ORDER BY keys. Completed tasks go last when they are listed at all;
/// `id` breaks remaining ties so pages never overlap.
fn order_clause(query: &TaskQuery) -> String {
    let mut keys: Vec<&'static str> = Vec::new();

    if query.show_all {
        keys.push("done ASC");
    }
    match (query.sort_by, query.ascending) {
        (SortKey::Priority, false) => keys.extend(["priority DESC", "due_date IS NULL", "due_date ASC"]),
        (SortKey::Priority, true) => keys.extend(["priority ASC", "due_date IS NULL", "due_date ASC"]),
        (SortKey::Due, true) => keys.extend(["due_date IS NULL", "due_date ASC", "priority DESC"]),
        (SortKey::Due, false) => keys.extend(["due_date IS NULL DESC", "due_date DESC", "priority DESC"]),
    }
    keys.push("id ASC");

    keys.join(", ")
}

fn row_to_task(row: &Row<'_>, fields: &FieldSelection) -> rusqlite::Result<Task> {
    Ok(Task {
        id: Some(row.get("id")?),
        description: row.get("description")?,
        priority: row.get("priority")?,
        due_date: row.get("due_date")?,
        done: row.get("done")?,
        status: if fields.status { Some(row.get("status")?) } else { None },
        comment: if fields.comment { row.get("comment")? } else { None },
        color: if fields.color { row.get("color")? } else { None },
    })
}
