use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig};
use crate::infrastructure::database::Database;
use crate::infrastructure::telegram::FileTimeouts;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub bot_token: Option<String>,
    pub bot_username: String,
    pub public_url: String,
    pub telegram_api_url: String,
    pub placeholder_font: Option<PathBuf>,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    url::Url::parse(&config.public_url).context("invalid UY_IJARA_PUBLIC_URL")?;
    url::Url::parse(&config.telegram_api_url).context("invalid UY_IJARA_TELEGRAM_API_URL")?;

    let database = Database::new(&config.database_url).context("invalid DATABASE_URL")?;
    database
        .ping()
        .await
        .context("failed to connect to database")?;

    if config.bot_token.as_deref().is_none_or(|t| t.trim().is_empty()) {
        warn!("BOT_TOKEN is not set; every photo request will get a placeholder");
    }

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            bot_token: config.bot_token,
            bot_username: config.bot_username,
            public_url: config.public_url,
            telegram_api_url: config.telegram_api_url,
            file_timeouts: FileTimeouts::default(),
            placeholder_font: config.placeholder_font,
        },
    );

    if !state.placeholder.has_truetype_font() {
        info!("arial.ttf not found, placeholders use the built-in bitmap font");
    }

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        database = %config.database_url,
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
