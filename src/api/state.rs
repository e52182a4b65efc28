use std::sync::Arc;

use crate::config::Config;
use crate::services::providers::{CatalogProvider, MediaResolver, YtDlpResolver, YtMusicClient};

/// Shared application state
///
/// Provider handles are constructed once at startup and reused for the
/// lifetime of the process; request handling never mutates them.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub resolver: Arc<dyn MediaResolver>,
}

impl AppState {
    /// Creates application state with the production providers
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: Arc::new(YtMusicClient::new(config.catalog_api_url.clone())),
            resolver: Arc::new(YtDlpResolver::new(config.ytdlp_path.clone())),
        }
    }

    /// Creates application state from explicit provider handles (used by tests)
    pub fn with_providers(
        catalog: Arc<dyn CatalogProvider>,
        resolver: Arc<dyn MediaResolver>,
    ) -> Self {
        Self { catalog, resolver }
    }
}
