use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{SearchResultItem, StreamResolution};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamParams {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Search the catalog for songs
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResultItem>>, AppError> {
    let query = params
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("No query provided".to_string()))?;

    tracing::info!(query = %query, "Searching for songs");

    let songs = state.catalog.search_songs(query).await.map_err(|e| {
        tracing::error!(error = %e, "Error searching");
        e
    })?;

    let results: Vec<SearchResultItem> = songs.into_iter().map(SearchResultItem::from).collect();

    tracing::info!(results = results.len(), "Found results");
    Ok(Json(results))
}

/// Autocomplete a partial search query
///
/// Never surfaces failure: a missing query or a provider error both yield an
/// empty list with status 200.
pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<String>> {
    let Some(query) = params.q.filter(|q| !q.is_empty()) else {
        return Json(Vec::new());
    };

    match state.catalog.search_suggestions(&query).await {
        Ok(suggestions) => Json(suggestions),
        Err(e) => {
            tracing::error!(error = %e, "Suggestion error");
            Json(Vec::new())
        }
    }
}

/// Resolve an audio stream URL for a video ID
pub async fn stream(
    State(state): State<AppState>,
    Query(params): Query<StreamParams>,
) -> Result<Json<StreamResolution>, AppError> {
    let video_id = params
        .video_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidInput("No videoId provided".to_string()))?;

    let url = format!("https://www.youtube.com/watch?v={video_id}");

    let info = state.resolver.resolve(&url).await.map_err(|e| {
        tracing::error!(error = %e, "Stream error");
        e
    })?;

    match info.audio_stream_url() {
        Some(stream_url) => Ok(Json(StreamResolution {
            stream_url: stream_url.to_string(),
        })),
        None => Err(AppError::NotFound("No stream found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{CatalogSong, MediaFormat, MediaInfo};
    use crate::services::providers::{MockCatalogProvider, MockMediaResolver};

    fn state(catalog: MockCatalogProvider, resolver: MockMediaResolver) -> AppState {
        AppState::with_providers(Arc::new(catalog), Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_search_missing_query_is_invalid_input() {
        let state = state(MockCatalogProvider::new(), MockMediaResolver::new());
        let result = search(State(state), Query(SearchParams { q: None })).await;

        match result {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "No query provided"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_empty_query_is_invalid_input() {
        let state = state(MockCatalogProvider::new(), MockMediaResolver::new());
        let result = search(
            State(state),
            Query(SearchParams {
                q: Some(String::new()),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_search_maps_songs_with_defaults() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_songs()
            .returning(|_| Ok(vec![CatalogSong::default()]));

        let state = state(catalog, MockMediaResolver::new());
        let Json(results) = search(
            State(state),
            Query(SearchParams {
                q: Some("anything".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].artist, "Unknown Artist");
        assert_eq!(results[0].album, "Single");
    }

    #[tokio::test]
    async fn test_search_propagates_provider_error() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_songs()
            .returning(|_| Err(AppError::Catalog("catalog exploded".to_string())));

        let state = state(catalog, MockMediaResolver::new());
        let result = search(
            State(state),
            Query(SearchParams {
                q: Some("anything".to_string()),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_suggestions_swallows_provider_error() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_suggestions()
            .returning(|_| Err(AppError::Catalog("catalog exploded".to_string())));

        let state = state(catalog, MockMediaResolver::new());
        let Json(result) = suggestions(
            State(state),
            Query(SearchParams {
                q: Some("anything".to_string()),
            }),
        )
        .await;

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_suggestions_missing_query_is_empty_list() {
        let state = state(MockCatalogProvider::new(), MockMediaResolver::new());
        let Json(result) = suggestions(State(state), Query(SearchParams { q: None })).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_stream_builds_canonical_watch_url() {
        let mut resolver = MockMediaResolver::new();
        resolver
            .expect_resolve()
            .withf(|url| url == "https://www.youtube.com/watch?v=abc123")
            .returning(|_| {
                Ok(MediaInfo {
                    url: None,
                    formats: vec![MediaFormat {
                        url: Some("https://media.example/audio".to_string()),
                        acodec: Some("opus".to_string()),
                        vcodec: Some("none".to_string()),
                    }],
                })
            });

        let state = state(MockCatalogProvider::new(), resolver);
        let Json(resolution) = stream(
            State(state),
            Query(StreamParams {
                video_id: Some("abc123".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(resolution.stream_url, "https://media.example/audio");
    }

    #[tokio::test]
    async fn test_stream_not_found_when_nothing_usable() {
        let mut resolver = MockMediaResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Ok(MediaInfo::default()));

        let state = state(MockCatalogProvider::new(), resolver);
        let result = stream(
            State(state),
            Query(StreamParams {
                video_id: Some("abc123".to_string()),
            }),
        )
        .await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No stream found"),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stream_missing_video_id_is_invalid_input() {
        let state = state(MockCatalogProvider::new(), MockMediaResolver::new());
        let result = stream(State(state), Query(StreamParams { video_id: None })).await;

        match result {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "No videoId provided"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }
}
