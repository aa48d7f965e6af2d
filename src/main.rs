use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use autosphere::application::{MarketplaceStore, StorePorts};
use autosphere::infrastructure::{
    AppConfig, CliArgs, KeyringTokenStorage, MarketplaceApiClient, StorageManager,
};
use autosphere::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_app(config: &AppConfig) -> Result<App> {
    let client = Arc::new(MarketplaceApiClient::with_base_url(
        &config.api.base_url,
        config.request_timeout(),
    )?);
    let token_storage = Arc::new(KeyringTokenStorage::new());

    let store = MarketplaceStore::new(
        StorePorts {
            auth: client.clone(),
            catalog: client.clone(),
            favorites: client,
            tokens: token_storage,
        },
        config.store_settings(),
    );

    Ok(App::new(store, config.image_resolver()))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(
        version = autosphere::VERSION,
        api = %config.api.base_url,
        "Starting AutoSphere"
    );

    let app = create_app(&config)?;
    let mut stdout = std::io::stdout().lock();
    app.run(args.command, &mut stdout).await
}
