use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nightfall::{
    api::{self, ApiState},
    config::HostConfig,
    host::{self, Host},
    inbox::Inbox,
    listener,
    outlet::OutletConfig,
    state::Game,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nightfall=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Nightfall...");

    let config = match HostConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let outlet_config = OutletConfig::from_env();
    let outlets = outlet_config
        .build_narrator()
        .and_then(|narrator| Ok((narrator, outlet_config.build_messenger()?)));
    let (narrator, messenger) = match outlets {
        Ok(outlets) => outlets,
        Err(e) => {
            tracing::error!("Failed to initialize outlets: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let inbox = Inbox::new();
    let host = Host::new(
        Game::new(),
        inbox.clone(),
        narrator,
        messenger,
        config.timing,
    );
    let status = host.subscribe();
    host::spawn_game_loop(host);

    if config.stdin_listener {
        if let Err(e) = listener::spawn_stdin_listener(inbox.clone()) {
            tracing::warn!("Failed to start stdin listener: {}", e);
        }
    }

    let app = api::router(ApiState { inbox, status });

    tracing::info!("Listening on http://{}", config.listen_addr);
    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.listen_addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
