use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::infrastructure::telegram::TELEGRAM_API_URL;

#[derive(Debug, Parser)]
#[command(author, version, about = "Rental listings API with a Telegram photo proxy", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://uy_ijara.db")]
    pub database_url: String,

    #[arg(long, env = "UY_IJARA_BIND_ADDRESS", default_value = "0.0.0.0:8000")]
    pub bind_address: SocketAddr,

    /// Telegram bot token used to resolve photo file ids
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    /// Bot username used in listing deep links
    #[arg(long, env = "BOT_USERNAME", default_value = "testuchun878_bot")]
    pub bot_username: String,

    /// Base URL this API is reachable under, used to build photo URLs
    #[arg(long, env = "UY_IJARA_PUBLIC_URL", default_value = "http://localhost:8000")]
    pub public_url: String,

    #[arg(long, env = "UY_IJARA_TELEGRAM_API_URL", default_value = TELEGRAM_API_URL)]
    pub telegram_api_url: String,

    /// TrueType font for placeholder captions, tried before arial.ttf
    #[arg(long, env = "UY_IJARA_PLACEHOLDER_FONT")]
    pub placeholder_font: Option<PathBuf>,
}
