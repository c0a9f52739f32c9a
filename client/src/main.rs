//! AI Fitness Coach
//!
//! Terminal front end for the AI Fitness Coach backend.
//!
//! ## Architecture
//!
//! - Workspace: pure state machine in `fitness-coach-shared`
//! - Session: owns the workspace and executes its effects
//! - Services: backend API, audio playback and downloads as tokio tasks
//! - REPL: reads commands and redraws the screen

use anyhow::Result;
use fitness_coach_client::{config, repl, session::Session, state::AppState};
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        backend = %config.api.base_url,
        "Starting AI Fitness Coach"
    );

    if config.api.timeout().is_none() {
        warn!("Request timeout disabled, backend calls may wait indefinitely");
    }

    let state = AppState::new(config)?;
    let mut session = Session::new(state);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    repl::run(&mut session, stdin, stdout, shutdown_signal()).await?;

    info!("Session closed");
    Ok(())
}

/// Initialize tracing/logging on stderr so it stays off the screen
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "fitness_coach_client=info".into()
        } else {
            "fitness_coach_client=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, closing session");
        }
        _ = terminate => {
            info!("Received SIGTERM, closing session");
        }
    }
}
