//! Voxbox Server - HTTP API wrapping synthesized speech into playable audio

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod error;
mod state;

use state::AppState;
use voxbox_core::VoxboxConfig;

const DEFAULT_CONFIG_PATH: &str = "voxbox.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxbox_server=debug,voxbox_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Voxbox Server");

    let config = load_config()?;
    info!(
        "Default sample rate: {} Hz, strict alignment: {}",
        config.encoder.default_sample_rate, config.encoder.strict_alignment
    );

    let addr = config.server.bind_addr();
    let state = AppState::new(config);

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Optional TOML file (`VOXBOX_CONFIG`, default `voxbox.toml`), then
/// `VOXBOX__SECTION__KEY` environment overrides.
fn load_config() -> anyhow::Result<VoxboxConfig> {
    let path = std::env::var("VOXBOX_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!("Loading configuration from {} (if present)", path);

    let settings = config::Config::builder()
        .add_source(config::File::with_name(&path).required(false))
        .add_source(
            config::Environment::with_prefix("VOXBOX")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        )
        .build()?;

    let config: VoxboxConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
