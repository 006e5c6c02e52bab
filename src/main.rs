//! CLI entry point for portfolio-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portfolio-rs")]
#[command(version)]
#[command(about = "Content resolver and CMS login service for an academic portfolio", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new portfolio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// List known pages and their content files
    #[command(alias = "ls")]
    List,

    /// Resolve a page and print it
    Show {
        /// Page slug (home, about, cv, ...)
        slug: String,

        /// Print the rendered HTML body instead of the JSON document
        #[arg(long)]
        html: bool,
    },

    /// Start the server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8888")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Print the CMS login authorize URL
    AuthUrl,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "portfolio_rs=debug,info"
    } else {
        "portfolio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing portfolio site in {:?}", target_dir);
            portfolio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized portfolio site in {:?}", target_dir);
        }

        Commands::List => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            portfolio_rs::commands::list::run(&portfolio)?;
        }

        Commands::Show { slug, html } => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            portfolio_rs::commands::show::run(&portfolio, &slug, html).await?;
        }

        Commands::Serve { port, ip } => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            portfolio_rs::server::start(&portfolio, &ip, port).await?;
        }

        Commands::AuthUrl => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            portfolio_rs::commands::auth_url::run(&portfolio)?;
        }

        Commands::Version => {
            println!("portfolio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
