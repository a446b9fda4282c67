use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::web;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,
}

pub async fn cmd(args: ServeArgs, config: Config) -> Result<()> {
    let config = match args.port {
        Some(_) => config,
        None => config.read_port()?,
    }
    .with_overrides(None, args.host, args.port);
    let tasks = Tasks::open(&config.db_path)?;

    web::start_server(&config.bind_address(), tasks).await
}
