//! Pagewright CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a default config file
//! - `build`   — Build one page from a request
//! - `pages`   — List the pages in the pages directory
//! - `show`    — Say where a page lives

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "pagewright",
    about = "Pagewright — build Streamlit pages from a plain-language request",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Build a page
    Build {
        /// What the page should contain
        #[arg(short, long)]
        query: String,

        /// Page name (also decides the file name)
        #[arg(short, long)]
        name: String,
    },

    /// List known pages
    Pages,

    /// Show where a page is defined
    Show {
        /// Page name as listed by `pagewright pages`
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Build { query, name } => commands::build::run(&query, &name).await?,
        Commands::Pages => commands::pages::run().await?,
        Commands::Show { name } => commands::show::run(&name).await?,
    }

    Ok(())
}
