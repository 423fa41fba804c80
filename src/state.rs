use std::sync::Arc;

use crate::config::Config;
use crate::upstream::github::GithubClient;
use crate::upstream::PageSource;

/// Shared application state. Immutable after startup; requests share only
/// the upstream client's connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn PageSource>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let github = GithubClient::new(&config.github)?;
        if github.is_authenticated() {
            tracing::info!("GitHub token configured; using authenticated rate limit");
        } else {
            tracing::info!("No GITHUB_TOKEN set; using unauthenticated rate limit");
        }
        Ok(Self::with_source(config, Arc::new(github)))
    }

    /// Build state around any page source (used with fakes in tests).
    pub fn with_source(config: Config, source: Arc<dyn PageSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }
}
