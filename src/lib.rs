//! rStopwatch library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::{Backend, Config};
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Run => cli::commands::run::handle(cfg).await,
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg).await,
    }
}

/// Apply global command-line overrides on top of the loaded configuration.
pub fn apply_cli_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(backend) = cli.backend {
        cfg.backend = backend;
    }
    // An explicit database always means the local store.
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
        cfg.backend = Backend::Sqlite;
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    apply_cli_overrides(&cli, &mut cfg);

    tracing::debug!(backend = ?cfg.backend, "configuration loaded");
    dispatch(&cli, &cfg).await
}
