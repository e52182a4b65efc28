/// External collaborator abstractions
///
/// The facade delegates all real work to two providers: a music-catalog
/// search provider and a media-extraction utility. Both are behind traits so
/// handlers can be exercised against mocks.
use crate::{
    error::AppResult,
    models::{CatalogSong, MediaInfo},
};

pub mod ytdlp;
pub mod ytmusic;

pub use ytdlp::YtDlpResolver;
pub use ytmusic::YtMusicClient;

/// Music catalog search provider
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog, restricted to the songs category.
    async fn search_songs(&self, query: &str) -> AppResult<Vec<CatalogSong>>;

    /// Autocomplete a partial query.
    ///
    /// The suggestion list is returned in provider order, unranked and
    /// undeduplicated.
    async fn search_suggestions(&self, query: &str) -> AppResult<Vec<String>>;
}

/// Media format extraction utility
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MediaResolver: Send + Sync {
    /// Extract available delivery formats for a media URL, without
    /// downloading the media itself.
    async fn resolve(&self, url: &str) -> AppResult<MediaInfo>;
}
