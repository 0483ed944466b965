//! # Deskmate — office assistant chat server
//!
//! Usage:
//!   deskmate serve                       # Start the HTTP/WebSocket gateway
//!   deskmate serve --port 8080           # Custom port
//!   deskmate ask "set a reminder at 3"   # One-shot answer in the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use deskmate_core::config::DeskmateConfig;
use deskmate_core::traits::Responder;
use deskmate_knowledge::KnowledgeBase;
use deskmate_responder::{ResponseSelector, SelectorOptions};

#[derive(Parser)]
#[command(name = "deskmate", version, about = "Deskmate — office assistant chat server")]
struct Cli {
    /// Path to config file (default: ~/.deskmate/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP/WebSocket gateway
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Answer a single message and exit
    Ask {
        /// The message to answer
        message: String,
    },
}

fn load_config(path: &Option<PathBuf>) -> Result<DeskmateConfig> {
    let config = match path {
        Some(p) => DeskmateConfig::load_from(p)?,
        None => DeskmateConfig::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Command::Serve { host, port } => {
            let mut config = load_config(&cli.config)?;
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            tracing::info!(
                "Deskmate {} starting (provider={})",
                env!("CARGO_PKG_VERSION"),
                config.default_provider
            );
            deskmate_gateway::start(&config).await
        }
        Command::Ask { message } => {
            let config = load_config(&cli.config)?;
            let knowledge = KnowledgeBase::from_config(&config.knowledge)?;
            tracing::debug!("Knowledge base loaded: {} entries", knowledge.len());
            let selector = ResponseSelector::new(
                Arc::new(knowledge),
                SelectorOptions::from(&config.responder),
            );
            let responder: Option<Box<dyn Responder>> =
                deskmate_providers::create_responder(&config)
                    .ok()
                    .filter(|r| r.is_configured());
            let reply = selector.respond(&message, &[], responder.as_deref()).await;
            println!("[{}] {}", reply.provenance.as_str(), reply.text);
            Ok(())
        }
    }
}
