//! JobBoard terminal client binary.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jobboard_app::commands::{self, Cli};
use jobboard_app::{App, AppConfig};
use jobboard_client::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Plain output for terminals, JSON when shipping logs
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("jobboard=warn".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.client.base_url = ClientConfig::with_base_url(url).base_url;
    }
    info!(
        api = %config.client.base_url,
        session_file = %config.session_file.display(),
        "Starting jobboard"
    );

    let app = App::new(config)?;
    debug!(authenticated = app.store.is_authenticated(), "Session restored");

    commands::run(cli.command, &app).await
}
