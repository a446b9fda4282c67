use super::{parse_due_date, parse_status};
use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{TaskStatus, TaskUpdate};
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the task to edit
    task_id: i64,

    /// New description
    #[arg(short, long)]
    description: Option<String>,

    /// New priority
    #[arg(short, long, allow_negative_numbers = true)]
    priority: Option<i64>,

    /// New due date in YYYY-MM-DD format
    #[arg(long, value_parser = parse_due_date, conflicts_with = "no_due_date")]
    due_date: Option<NaiveDate>,

    /// Remove the due date
    #[arg(long)]
    no_due_date: bool,

    /// New status: "not started", "in progress" or "done"
    #[arg(long, value_parser = parse_status)]
    status: Option<TaskStatus>,

    /// New comment (empty string clears it)
    #[arg(long)]
    comment: Option<String>,

    /// New display color (empty string clears it)
    #[arg(long)]
    color: Option<String>,
}

impl EditArgs {
    fn to_update(&self) -> TaskUpdate {
        let due_date = if self.no_due_date { Some(None) } else { self.due_date.map(Some) };

        TaskUpdate {
            description: self.description.clone(),
            priority: self.priority,
            due_date,
            status: self.status,
            comment: self.comment.clone(),
            color: self.color.clone(),
        }
    }
}

pub fn cmd(tasks: &mut Tasks, args: EditArgs) -> Result<()> {
    let update = args.to_update();
    if update.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    tasks.update(args.task_id, &update)?;

    msg_success!(Message::TaskUpdated(args.task_id));
    Ok(())
}
