//! Route handlers.

use super::{pages, AppState};
use crate::libs::error::TaskError;
use crate::libs::task::{parse_due_date, parse_priority, FieldSelection, SortKey, Task, TaskQuery, TaskStatus, TaskUpdate};
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Deserialize;

/// Tasks per page on the index.
pub const PAGE_SIZE: u32 = 10;

/// Sort options offered on the index page, as `(query value, label)`.
pub const SORT_OPTIONS: [(&str, &str); 4] = [
    ("desc", "Priority: high to low"),
    ("asc", "Priority: low to high"),
    ("due_asc", "Due date: soonest first"),
    ("due_desc", "Due date: latest first"),
];

type HandlerResult<T> = Result<T, TaskError>;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub sort: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
}

impl IndexQuery {
    /// Unknown sort values fall back to priority, highest first.
    fn sort_key(&self) -> (SortKey, bool) {
        match self.sort.as_deref() {
            Some("asc") => (SortKey::Priority, true),
            Some("due_asc") => (SortKey::Due, true),
            Some("due_desc") => (SortKey::Due, false),
            _ => (SortKey::Priority, false),
        }
    }

    /// Unknown status values mean "no status filter".
    fn status_filter(&self) -> Option<TaskStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }

    fn task_query(&self) -> TaskQuery {
        let (sort_by, ascending) = self.sort_key();
        TaskQuery::new()
            .show_all(true)
            .sort(sort_by, ascending)
            .search(self.q.as_deref())
            .status(self.status_filter())
            .fields(FieldSelection::all())
    }
}

/// What the index template needs besides the tasks themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub sort: String,
    pub search: String,
    pub status: Option<TaskStatus>,
    pub page: u32,
    pub last_page: u32,
    pub total: usize,
}

impl ListView {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub color: String,
}

impl AddForm {
    fn into_task(self) -> HandlerResult<Task> {
        let priority = blank_to_none(&self.priority)
            .map(parse_priority)
            .transpose()?
            .unwrap_or(Task::DEFAULT_PRIORITY);
        let due_date = blank_to_none(&self.due_date).map(parse_due_date).transpose()?;
        let status = blank_to_none(&self.status)
            .map(str::parse::<TaskStatus>)
            .transpose()?
            .unwrap_or_default();

        Ok(Task::new(&self.description)
            .with_priority(priority)
            .with_due_date(due_date)
            .with_status(status)
            .with_comment(blank_to_none(&self.comment).map(str::to_string))
            .with_color(blank_to_none(&self.color).map(str::to_string)))
    }
}

/// Edit form fields. A missing field is left unchanged; an empty due date
/// clears it, and empty comment or color clear those.
#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub color: Option<String>,
}

impl EditForm {
    fn into_update(self) -> HandlerResult<TaskUpdate> {
        let priority = self
            .priority
            .as_deref()
            .and_then(blank_to_none)
            .map(parse_priority)
            .transpose()?;
        let due_date = match self.due_date.as_deref() {
            None => None,
            Some(value) => Some(blank_to_none(value).map(parse_due_date).transpose()?),
        };
        let status = self
            .status
            .as_deref()
            .and_then(blank_to_none)
            .map(str::parse::<TaskStatus>)
            .transpose()?;

        Ok(TaskUpdate {
            description: self.description,
            priority,
            due_date,
            status,
            comment: self.comment,
            color: self.color,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    pub comment: Option<String>,
    pub color: Option<String>,
}

fn blank_to_none(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// GET /
pub async fn index(State(state): State<AppState>, Query(params): Query<IndexQuery>) -> HandlerResult<Html<String>> {
    let base = params.task_query();
    let page_size = PAGE_SIZE as usize;

    let total = state.tasks.lock().count(&base)?;
    let last_page = total.div_ceil(page_size).max(1) as u32;
    let page = params.page_number().min(last_page);
    let query = base.page(Some(PAGE_SIZE), Some((page - 1) * PAGE_SIZE));
    let tasks = state.tasks.lock().list(&query)?;

    let view = ListView {
        sort: params.sort.clone().unwrap_or_else(|| "desc".to_string()),
        search: params.q.clone().unwrap_or_default(),
        status: params.status_filter(),
        page,
        last_page,
        total,
    };

    Ok(Html(pages::index_page(&tasks, &view)))
}

/// POST /add
pub async fn add_task(State(state): State<AppState>, Form(form): Form<AddForm>) -> HandlerResult<Redirect> {
    let task = form.into_task()?;
    state.tasks.lock().add(&task)?;
    Ok(Redirect::to("/"))
}

/// POST /done/{id}
pub async fn mark_done(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Redirect> {
    state.tasks.lock().mark_done(id)?;
    Ok(Redirect::to("/"))
}

/// POST /delete/{id}
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Redirect> {
    state.tasks.lock().delete(id)?;
    Ok(Redirect::to("/"))
}

/// GET /edit/{id}
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Html<String>> {
    let task = state.tasks.lock().get(id)?;
    Ok(Html(pages::edit_page(&task)))
}

/// POST /edit/{id}
pub async fn edit_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditForm>,
) -> HandlerResult<Redirect> {
    let update = form.into_update()?;
    state.tasks.lock().update(id, &update)?;
    Ok(Redirect::to("/"))
}

/// POST /comment/{id}
/// Saves comment and color in the background; the page does not navigate.
pub async fn save_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> HandlerResult<StatusCode> {
    let update = TaskUpdate {
        comment: form.comment,
        color: form.color,
        ..TaskUpdate::default()
    };
    state.tasks.lock().update(id, &update)?;
    Ok(StatusCode::NO_CONTENT)
}
