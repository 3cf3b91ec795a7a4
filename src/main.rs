mod app;
mod archive;
mod assets;
mod codec;
mod config;
mod error;
mod loader;
mod logger;
mod models;
mod render;
mod repository;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{Options, View};

#[derive(Parser)]
#[command(name = "frontpage")]
#[command(about = "News front page and snapshot archive")]
struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Also print info-level logs to the console
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the XDG one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// The front page, from the current snapshot
    Current,
    /// Archived snapshots grouped by day
    Archive,
    /// One archived snapshot
    Show {
        /// e.g. news-data-2024-01-02-10-00-00
        slug: String,
    },
    /// Every archive slug, newest first
    Slugs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let view = match cli.command {
        Command::Current => View::Current,
        Command::Archive => View::Archive,
        Command::Show { slug } => View::Show(slug),
        Command::Slugs => View::Slugs,
    };

    app::run(
        view,
        Options {
            json: cli.json,
            verbose: cli.verbose,
            config: cli.config.as_deref(),
        },
    )
    .await
}
