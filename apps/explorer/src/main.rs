//! Steam Explorer entry point.

mod cli;
mod config;
mod render;

use std::process::ExitCode;

use steam_explorer_api::{Gateway, GatewayError};
use steam_explorer_gallery::Gallery;
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting Steam Explorer");

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}\n\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    // Load configuration.
    let explorer_config = match config::ExplorerConfig::load() {
        Ok(c) => {
            tracing::info!(relay = %c.relay_url, "configuration loaded");
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            config::ExplorerConfig::default()
        }
    };
    if explorer_config.api_key.is_empty() {
        tracing::warn!("no Steam API key configured, profile and library lookups will likely fail");
    }

    let gateway = match Gateway::new(explorer_config.gateway_config()) {
        Ok(g) => g,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    match run(&gateway, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(kind = e.kind(), "command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one command against the gateway and prints the result.
async fn run(gateway: &Gateway, command: Command) -> Result<(), GatewayError> {
    match command {
        Command::Profile(steam_id) => {
            let player = gateway.player_summary(&steam_id).await?;
            print!("{}", render::render_profile(&player));

            // The profile stays on screen even when the library is hidden.
            match gateway.owned_games(&steam_id).await {
                Ok(games) => print!("\n{}", render::render_games(&games)),
                Err(e) => eprintln!("\n{e}"),
            }
        }
        Command::Game(app_id) => {
            let detail = gateway.game_details(app_id).await?;
            print!("{}", render::render_detail(&detail));
        }
        Command::Gallery(query) => {
            let trending = gateway.trending_games().await;
            eprint!("{}", render::render_warnings(&trending.warnings));

            let mut gallery = Gallery::load(trending.games, &mut rand::thread_rng());
            gallery.set_query(query);
            print!("{}", render::render_games(gallery.visible()));
        }
    }
    Ok(())
}
