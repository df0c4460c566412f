mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wedding_core::SiteConfig;

#[derive(Parser)]
#[command(name = "wedding")]
#[command(about = "Serve the wedding invitation site, or RSVP straight from the terminal")]
struct Cli {
    /// Site config file (defaults to ~/.config/wedding-site/site.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the invitation pages
    Serve {
        /// Address to listen on (overrides `bind` from the config)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Fill in and send an RSVP for an invitation page
    Rsvp {
        page: String, // e.g. "reception"
    },
    /// List the events, optionally only those of one page
    Events {
        #[arg(short, long)]
        page: Option<String>,
    },
    /// Export a page's events as an .ics calendar
    Ics {
        page: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show where the site config lives
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep interactive commands quiet unless RUST_LOG asks otherwise
    let default_filter = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { bind } => commands::serve::run(load_site(&cli.config)?, bind).await,
        Commands::Rsvp { page } => commands::rsvp::run(load_site(&cli.config)?, &page).await,
        Commands::Events { page } => commands::events::run(&load_site(&cli.config)?, page.as_deref()),
        Commands::Ics { page, output } => {
            commands::ics::run(&load_site(&cli.config)?, &page, output.as_deref())
        }
        Commands::Config => commands::config::run(cli.config.as_deref()),
    }
}

fn load_site(path: &Option<PathBuf>) -> Result<SiteConfig> {
    Ok(SiteConfig::load(path.as_deref())?)
}
