//! Command implementations, one module per command group

mod auth;
mod batch;
mod completed;
mod project;
mod quadrant;
mod sync;
mod tag;
mod task;

use anyhow::{Context, Result};
use dida365_core::{Config, Dida365Client};

use crate::args::{Cli, Commands};
use crate::output::Output;

/// Loaded configuration, the shared client, and the output mode
pub struct App {
    pub config: Config,
    pub client: Dida365Client,
    pub out: Output,
}

impl App {
    pub fn new(config: Config, json: bool) -> Result<Self> {
        let client = config.client().context("Failed to create Dida365 client")?;
        Ok(Self {
            config,
            client,
            out: Output::new(json),
        })
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let app = App::new(config, cli.json)?;

    match cli.command {
        Commands::Auth(cmd) => auth::run(&app, cmd).await,
        Commands::Project(cmd) => project::run(&app, cmd).await,
        Commands::Task(cmd) => task::run(&app, cmd).await,
        Commands::Completed(cmd) => completed::run(&app, cmd).await,
        Commands::Sync(cmd) => sync::run(&app, cmd).await,
        Commands::Tag(cmd) => tag::run(&app, cmd).await,
        Commands::Batch(cmd) => batch::run(&app, cmd).await,
        Commands::Quadrant(cmd) => quadrant::run(&app, cmd).await,
    }
}
