use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the task to delete
    task_id: i64,
}

pub fn cmd(tasks: &mut Tasks, args: DeleteArgs) -> Result<()> {
    tasks.delete(args.task_id)?;

    msg_success!(Message::TaskDeleted(args.task_id));
    Ok(())
}
