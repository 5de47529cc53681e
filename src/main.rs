use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vinyl_scout::config::{AppConfig, CliConfig, FileConfig};
use vinyl_scout::discogs::{CollectionService, DiscogsClient};
use vinyl_scout::server::run_server;
use vinyl_scout::spotify::{ListeningService, SpotifyClient};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the TOML config file holding service credentials.
    #[clap(short, long, default_value = "vinyl-scout.toml")]
    pub config: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// Timeout in seconds for upstream API requests.
    #[clap(long, default_value_t = 30)]
    pub request_timeout_sec: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    info!("Loading config from {:?}...", cli_args.config);
    let file_config = FileConfig::load(&cli_args.config)
        .with_context(|| format!("Cannot load config file {:?}", cli_args.config))?;

    let cli_config = CliConfig {
        port: cli_args.port,
        request_timeout_sec: cli_args.request_timeout_sec,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let listening: Arc<dyn ListeningService> = Arc::new(SpotifyClient::new(
        config.spotify.api_base_url.clone(),
        config.spotify.access_token.clone(),
        config.request_timeout_sec,
    ));

    let collection: Arc<dyn CollectionService> = Arc::new(DiscogsClient::new(
        config.discogs.api_base_url.clone(),
        config.discogs.username.clone(),
        config.discogs.token.clone(),
        config.request_timeout_sec,
    ));

    info!(
        "Serving Discogs collection of user {} at port {}!",
        config.discogs.username, config.port
    );
    run_server(listening, collection, config.port).await
}
