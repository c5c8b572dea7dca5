// src/main.rs — projectchat entry point

use std::sync::Arc;

use clap::{Parser, Subcommand};

use projectchat::api::{self, ApiState};
use projectchat::chat::ChatEngine;
use projectchat::infra::config::Config;
use projectchat::infra::logger;
use projectchat::provider::resolver;
use projectchat::store;

#[derive(Parser)]
#[command(name = "projectchat", version, about = "Conversational project intake API")]
struct Cli {
    /// Path to a TOML config file (defaults to ./projectchat.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (the default when no subcommand is given)
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Respects RUST_LOG when set
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        None => serve(config).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let resolved = resolver::resolve(&config.provider)?;
    tracing::info!(
        provider = resolved.provider.id(),
        model = %resolved.model,
        "provider resolved"
    );

    let store = store::open(std::path::Path::new(&config.store.db_path))?;
    let (store_handle, _store_task) = store::spawn_store_server(store);

    let engine = ChatEngine::new(
        resolved.provider,
        resolved.model,
        store_handle,
        config.chat.clone(),
    );

    let state = ApiState {
        engine: Arc::new(engine),
    };

    api::start_server(&config.server, state).await
}
