use crate::config::Backend;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rStopwatch
#[derive(Parser)]
#[command(
    name = "rstopwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "A terminal stopwatch: time a session, save it to a table store and list past sessions",
    long_about = None
)]
pub struct Cli {
    /// Use a local SQLite store at this path (useful for tests or a custom DB)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Override the configured table store backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<Backend>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the local database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start the interactive stopwatch
    Run,

    /// List saved times, newest first
    List {
        /// Print the records as a JSON array
        #[arg(long)]
        json: bool,
    },
}
