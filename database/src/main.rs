use clap::{Parser, Subcommand};
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

/// Asset Inventory Database Management CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for database management
#[derive(Subcommand)]
enum Commands {
    /// Create a new database
    Create {
        /// Database name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Run database migrations
    Migrate {
        /// Number of migrations to run (all if not specified)
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Show applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create { name } => {
            commands::create::execute(name).await?;
        }
        Commands::Migrate { steps } => {
            commands::migrate::execute(steps).await?;
        }
        Commands::Status => {
            commands::migrate::status().await?;
        }
    }

    Ok(())
}
