use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use melodeck::application::TokenSource;
use melodeck::application::use_cases::ResolveSessionUseCase;
use melodeck::domain::ports::TokenStoragePort;
use melodeck::infrastructure::{
    ApiClient, AppConfig, CliArgs, KeyringTokenStorage, LocalSessionStore, StorageManager,
    SystemClock, TokenBackend,
};
use melodeck::presentation::{App, Services};

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
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match StorageManager::new() {
        Ok(manager) => manager.load_config(args.config.as_deref())?,
        Err(e) => {
            eprintln!("warning: {e}; using default configuration");
            AppConfig::default()
        }
    };
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(
        version = melodeck::VERSION,
        api = %config.api_base_url,
        "Starting melodeck"
    );

    let session_store = Arc::new(LocalSessionStore::new());
    let tokens: Arc<dyn TokenStoragePort> = match config.token_backend {
        TokenBackend::File => session_store.clone(),
        TokenBackend::Keyring => Arc::new(KeyringTokenStorage::new()),
    };

    let api = Arc::new(ApiClient::with_timeout(
        config.api_base_url.clone(),
        config.request_timeout(),
        tokens.clone(),
    )?);

    let session = ResolveSessionUseCase::new(tokens.clone(), session_store.clone())
        .execute(args.token.clone())
        .await?;
    if let Some(resolved) = &session {
        info!(source = %resolved.source, "Found existing token");
        if resolved.source == TokenSource::CommandLine {
            api.use_token(resolved.token.clone());
        }
    } else {
        info!("No session available; only public commands will work");
    }

    let services = Services {
        auth: api.clone(),
        catalog: api.clone(),
        library: api.clone(),
        reports: api.clone(),
        studio: api.clone(),
        admin: api,
        tokens,
        profiles: session_store,
        clock: Arc::new(SystemClock),
    };

    App::new(services, session, config.search_debounce())
        .run(args.command)
        .await
}
