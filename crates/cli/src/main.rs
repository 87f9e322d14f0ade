use anyhow::Context;
use clap::{Parser, Subcommand};

use biblioteca_kernel::settings::Settings;

/// Library catalogue API
#[derive(Debug, Parser)]
#[command(name = "biblioteca", version, about)]
struct Cli {
    /// Override `database.url` from configuration
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve {
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create missing tables and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load settings")?;
    if let Some(url) = cli.database_url {
        settings.database.url = url;
    }
    biblioteca_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            biblioteca_app::bootstrap::serve(&settings).await
        }
        Command::Migrate => {
            let applied = biblioteca_app::bootstrap::migrate(&settings).await?;
            tracing::info!(applied, db = %settings.database.url, "schema up to date");
            println!("applied {applied} migration(s)");
            Ok(())
        }
    }
}
