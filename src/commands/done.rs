use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// ID of the task to mark as done
    task_id: i64,
}

pub fn cmd(tasks: &mut Tasks, args: DoneArgs) -> Result<()> {
    tasks.mark_done(args.task_id)?;

    msg_success!(Message::TaskMarkedDone(args.task_id));
    Ok(())
}
