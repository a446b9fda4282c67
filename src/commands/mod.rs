pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod seed;
pub mod serve;

use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::task::{self, TaskStatus};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Add a new task")]
    Add(add::AddArgs),
    #[command(about = "List tasks")]
    List(list::ListArgs),
    #[command(about = "Mark a task as done")]
    Done(done::DoneArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Edit fields of a task")]
    Edit(edit::EditArgs),
    #[command(about = "Add sample tasks to an empty store")]
    Seed,
    #[command(about = "Run the web interface")]
    Serve(serve::ServeArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Task store file (overrides TASKTRACK_DB)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        Self::parse().run().await
    }

    /// Executes the parsed command against the configured store.
    pub async fn run(self) -> Result<()> {
        let config = Config::read().with_overrides(self.db, None, None);

        match self.command {
            Commands::Add(args) => add::cmd(&mut open_store(&config)?, args),
            Commands::List(args) => list::cmd(&open_store(&config)?, args),
            Commands::Done(args) => done::cmd(&mut open_store(&config)?, args),
            Commands::Delete(args) => delete::cmd(&mut open_store(&config)?, args),
            Commands::Edit(args) => edit::cmd(&mut open_store(&config)?, args),
            Commands::Seed => seed::cmd(&mut open_store(&config)?),
            Commands::Serve(args) => serve::cmd(args, config).await,
        }
    }
}

fn open_store(config: &Config) -> Result<Tasks> {
    Ok(Tasks::open(&config.db_path)?)
}

/// clap value parser for `--status`.
fn parse_status(value: &str) -> Result<TaskStatus, String> {
    value.parse::<TaskStatus>().map_err(|e| e.to_string())
}

/// clap value parser for due dates.
fn parse_due_date(value: &str) -> Result<NaiveDate, String> {
    task::parse_due_date(value).map_err(|e| e.to_string())
}
