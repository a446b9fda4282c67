//! Task domain types shared by the store and the front ends.
//!
//! A [`Task`] is the only entity the application persists. The store never
//! builds SQL from user text: listing goes through a [`TaskQuery`] (a fixed
//! set of optional predicates plus one [`SortKey`]) and partial writes go
//! through a [`TaskUpdate`] whose `None` fields are left untouched.

use crate::libs::error::TaskError;
use crate::libs::messages::Message;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a task.
///
/// Any transition is permitted. The stored `done` flag is always derived
/// from this value via [`TaskStatus::is_done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::NotStarted, TaskStatus::InProgress, TaskStatus::Done];

    /// Value stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not started",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    /// Accepts the stored spelling as well as dashed and underscored forms,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "not started" => Ok(TaskStatus::NotStarted),
            "in progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(TaskError::Validation(Message::InvalidStatus(s.to_string()))),
        }
    }
}

/// Parses a `YYYY-MM-DD` due date.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TaskError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TaskError::Validation(Message::InvalidDueDate(value.to_string())))
}

/// Parses an integer priority. Any integer is accepted.
pub fn parse_priority(value: &str) -> Result<i64, TaskError> {
    value
        .trim()
        .parse()
        .map_err(|_| TaskError::Validation(Message::InvalidPriority(value.to_string())))
}

/// A single tracked task.
///
/// `id` is `None` until the store assigns one. `status`, `comment` and
/// `color` are `None` when the row was read without those columns selected
/// (see [`FieldSelection`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub description: String,
    pub priority: i64,
    pub due_date: Option<NaiveDate>,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Task {
    pub const DEFAULT_PRIORITY: i64 = 1;

    pub fn new(description: &str) -> Self {
        Task {
            id: None,
            description: description.to_string(),
            priority: Self::DEFAULT_PRIORITY,
            due_date: None,
            done: false,
            status: Some(TaskStatus::NotStarted),
            comment: None,
            color: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.done = status.is_done();
        self.status = Some(status);
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    /// Status to display: the stored one when selected, otherwise derived
    /// from the `done` flag.
    pub fn effective_status(&self) -> TaskStatus {
        match self.status {
            Some(status) => status,
            None if self.done => TaskStatus::Done,
            None => TaskStatus::NotStarted,
        }
    }
}

/// Partial update applied by `Tasks::update`.
///
/// `due_date` is doubly optional: `Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub priority: Option<i64>,
    pub due_date: Option<Option<NaiveDate>>,
    pub status: Option<TaskStatus>,
    pub comment: Option<String>,
    pub color: Option<String>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.comment.is_none()
            && self.color.is_none()
    }
}

/// Primary ordering for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Priority,
    Due,
}

/// Optional columns to populate in listed tasks. Never affects filtering or
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub status: bool,
    pub comment: bool,
    pub color: bool,
}

impl FieldSelection {
    pub fn all() -> Self {
        FieldSelection {
            status: true,
            comment: true,
            color: true,
        }
    }

    pub fn none() -> Self {
        FieldSelection {
            status: false,
            comment: false,
            color: false,
        }
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Filter, sort and pagination options for `Tasks::list` and `Tasks::count`.
///
/// Defaults match the plain `list` command: open tasks only, highest
/// priority first, no pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub show_all: bool,
    pub ascending: bool,
    pub sort_by: SortKey,
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub fields: FieldSelection,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn sort(mut self, sort_by: SortKey, ascending: bool) -> Self {
        self.sort_by = sort_by;
        self.ascending = ascending;
        self
    }

    /// Blank search text is treated as no search.
    pub fn search(mut self, search: Option<&str>) -> Self {
        self.search = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    pub fn status(mut self, status: Option<TaskStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn page(mut self, limit: Option<u32>, offset: Option<u32>) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn fields(mut self, fields: FieldSelection) -> Self {
        self.fields = fields;
        self
    }
}
