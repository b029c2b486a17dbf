use crate::components::gemini::GeminiClient;
use crate::components::google_calendar::store::FileCredentialStore;
use crate::components::google_calendar::token::TokenManager;
use crate::components::google_calendar::GoogleCalendarClient;
use crate::config::Config;
use crate::error::Error;
use crate::prompt::ConsolePrompter;
use crate::workflow::Workflow;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire up the components and run the workflow once
pub async fn run(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let token_cache_path = {
        let config_read = config.read().await;
        config_read.token_cache_path.clone()
    };

    let store = Arc::new(FileCredentialStore::new(token_cache_path));
    let token_manager = TokenManager::new(Arc::clone(&config), store);
    let calendar = GoogleCalendarClient::new(Arc::clone(&config), token_manager);
    let suggestions = GeminiClient::new(Arc::clone(&config));

    let workflow = Workflow::new(config, calendar, suggestions, ConsolePrompter);
    workflow.run().await?;

    Ok(())
}
