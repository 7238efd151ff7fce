//! Gitgram - GitHub webhook to Telegram relay
//!
//! Long-lived HTTP service that accepts GitHub webhook callbacks and
//! forwards a formatted summary of each event to a Telegram chat.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitgram::{
    api::{build_app, AppState},
    config::GitgramConfig,
    format::{MessageFormatter, OutboundMessage},
    telegram::{Notifier, TelegramNotifier},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gitgram")]
#[command(version)]
#[command(about = "Relay GitHub webhook events to a Telegram chat")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GITGRAM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook relay server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Send a test message through the configured relay
    SendTest {
        /// Message content
        #[arg(short, long, default_value = "gitgram test message")]
        message: String,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gitgram={},tower_http={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        GitgramConfig::load(config_path)?
    } else {
        GitgramConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            run_serve(config, host, port).await?;
        }
        Commands::SendTest { message } => {
            run_send_test(config, message).await?;
        }
        Commands::Config { default } => {
            let config = if default { GitgramConfig::default() } else { config };
            show_config(&config)?;
        }
    }

    Ok(())
}

async fn run_serve(
    mut config: GitgramConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    // Resolve credentials up front so a missing token or chat id is a
    // startup failure, not a silent per-request no-op.
    let credentials = config.telegram.resolve()?;

    let state = AppState {
        formatter: Arc::new(MessageFormatter::new(config.format.clone())),
        notifier: Arc::new(TelegramNotifier::new(
            credentials,
            config.telegram.disable_web_page_preview,
        )),
    };
    let app = build_app(state, &config.server.webhook_path);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "gitgram listening on {} (webhook path {})",
        addr,
        config.server.webhook_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gitgram stopped");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}

async fn run_send_test(config: GitgramConfig, message: String) -> Result<()> {
    let credentials = config.telegram.resolve()?;
    let notifier = TelegramNotifier::new(credentials, config.telegram.disable_web_page_preview);

    notifier
        .send(OutboundMessage {
            text: message,
            parse_mode: config.format.parse_mode,
        })
        .await?;

    println!("Test message sent");

    Ok(())
}

fn show_config(config: &GitgramConfig) -> Result<()> {
    let toml = toml::to_string_pretty(config)?;
    println!("{}", toml);
    Ok(())
}
