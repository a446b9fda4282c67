use super::{parse_due_date, parse_status};
use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskStatus};
use crate::msg_success;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task description
    #[arg(required = true)]
    description: String,

    /// Priority (higher means more important)
    #[arg(short, long, default_value_t = Task::DEFAULT_PRIORITY, allow_negative_numbers = true)]
    priority: i64,

    /// Due date in YYYY-MM-DD format
    #[arg(short, long, value_parser = parse_due_date)]
    due_date: Option<NaiveDate>,

    /// Initial status: "not started", "in progress" or "done"
    #[arg(long, value_parser = parse_status, default_value = "not started")]
    status: TaskStatus,

    /// Free-form comment
    #[arg(long)]
    comment: Option<String>,

    /// Display color, e.g. "#ff8800"
    #[arg(long)]
    color: Option<String>,
}

pub fn cmd(tasks: &mut Tasks, args: AddArgs) -> Result<()> {
    let task = Task::new(&args.description)
        .with_priority(args.priority)
        .with_due_date(args.due_date)
        .with_status(args.status)
        .with_comment(args.comment)
        .with_color(args.color);
    let id = tasks.add(&task)?;

    msg_success!(Message::TaskCreated(id));
    Ok(())
}
