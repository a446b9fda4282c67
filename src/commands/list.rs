use super::parse_status;
use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{FieldSelection, SortKey, TaskQuery, TaskStatus};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show completed tasks as well
    #[arg(short, long)]
    all: bool,

    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,

    /// Primary sort key
    #[arg(long, value_enum, default_value_t = SortKey::Priority)]
    sort_by: SortKey,

    /// Only tasks whose description contains this text (case-insensitive)
    #[arg(short, long)]
    search: Option<String>,

    /// Only tasks with this status
    #[arg(long, value_parser = parse_status)]
    status: Option<TaskStatus>,

    /// Maximum number of tasks to show
    #[arg(long)]
    limit: Option<u32>,

    /// Number of matching tasks to skip
    #[arg(long)]
    offset: Option<u32>,

    /// Print tasks as JSON
    #[arg(long, conflicts_with = "table")]
    json: bool,

    /// Print tasks as a table including comments and colors
    #[arg(long)]
    table: bool,
}

impl ListArgs {
    fn to_query(&self) -> TaskQuery {
        let detailed = self.json || self.table;
        let fields = FieldSelection {
            status: true,
            comment: detailed,
            color: detailed,
        };

        TaskQuery::new()
            .show_all(self.all)
            .sort(self.sort_by, self.asc)
            .search(self.search.as_deref())
            .status(self.status)
            .page(self.limit, self.offset)
            .fields(fields)
    }
}

pub fn cmd(tasks: &Tasks, args: ListArgs) -> Result<()> {
    let query = args.to_query();
    let listed = tasks.list(&query)?;

    if args.json {
        return View::json(&listed);
    }
    if listed.is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    if args.table {
        View::tasks(&listed)?;
    } else {
        View::task_lines(&listed);
    }

    if query.limit.is_some() || query.offset.is_some() {
        let total = tasks.count(&query)?;
        msg_print!(Message::TaskListPage { shown: listed.len(), total }, true);
    }

    Ok(())
}
