//! lectern - CLI front end for the flat-file catalog.
//!
//! This is a thin wrapper over the `lectern` library crates: it maps
//! the catalog operation surface onto subcommands and renders each
//! result either as human-readable output or as the uniform
//! `{status, message, data?}` envelope.

mod cli;
mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lectern_file::FileCatalog;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let catalog = FileCatalog::new(&data_dir);
    let json = cli.json;

    match cli.command {
        Commands::Register(args) => commands::register::run(&catalog, json, args).await,
        Commands::Login(args) => commands::login::run(&catalog, json, args).await,
        Commands::List(args) => commands::list::run(&catalog, json, args).await,
        Commands::Upload(args) => commands::upload::run(&catalog, json, args).await,
        Commands::Edit(args) => commands::edit::run(&catalog, json, args).await,
        Commands::Delete(args) => commands::delete::run(&catalog, json, args).await,
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "lectern")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./lectern-data"))
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
