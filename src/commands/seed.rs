use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;

pub fn cmd(tasks: &mut Tasks) -> Result<()> {
    match tasks.seed_if_empty()? {
        0 => msg_info!(Message::SeedSkipped),
        inserted => msg_success!(Message::TasksSeeded(inserted)),
    }
    Ok(())
}
