/// YouTube Music catalog provider
///
/// Thin client for the InnerTube web API (the endpoint YouTube Music's own
/// web player talks to). Only the two calls the facade needs are implemented:
/// songs search and search suggestions.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogAlbum, CatalogArtist, CatalogSong, CatalogThumbnail},
    services::providers::CatalogProvider,
};

const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20241106.01.00";
const ORIGIN: &str = "https://music.youtube.com";

/// InnerTube `params` value restricting search results to songs
const SONGS_FILTER_PARAMS: &str = "EgWKAQIIAWoKEAkQBRAKEAMQBA%3D%3D";

#[derive(Clone)]
pub struct YtMusicClient {
    http_client: HttpClient,
    api_url: String,
}

impl YtMusicClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> AppResult<R>
    where
        B: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.api_url, endpoint);
        let response = self
            .http_client
            .post(&url)
            .header("Origin", ORIGIN)
            .header("Referer", format!("{ORIGIN}/"))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for YtMusicClient {
    async fn search_songs(&self, query: &str) -> AppResult<Vec<CatalogSong>> {
        let request = SearchRequest {
            context: ClientContext::web(),
            query,
            params: Some(SONGS_FILTER_PARAMS),
        };

        let response: RawSearchResponse = self.post("search", &request).await?;
        let songs = parse_search_response(response);

        tracing::info!(
            query = %query,
            results = songs.len(),
            provider = "ytmusic",
            "Song search completed"
        );

        Ok(songs)
    }

    async fn search_suggestions(&self, query: &str) -> AppResult<Vec<String>> {
        let request = SuggestionsRequest {
            context: ClientContext::web(),
            input: query,
        };

        let response: RawSuggestionsResponse =
            self.post("music/get_search_suggestions", &request).await?;
        let suggestions = parse_suggestions_response(response);

        tracing::debug!(
            query = %query,
            suggestions = suggestions.len(),
            provider = "ytmusic",
            "Suggestions fetched"
        );

        Ok(suggestions)
    }
}

// ============================================================================
// Request payloads
// ============================================================================

#[derive(Debug, Serialize)]
struct ClientContext {
    client: ClientInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo {
    client_name: &'static str,
    client_version: &'static str,
    hl: &'static str,
    gl: &'static str,
}

impl ClientContext {
    fn web() -> Self {
        Self {
            client: ClientInfo {
                client_name: CLIENT_NAME,
                client_version: CLIENT_VERSION,
                hl: "en",
                gl: "US",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    context: ClientContext,
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct SuggestionsRequest<'a> {
    context: ClientContext,
    input: &'a str,
}

// ============================================================================
// Raw search response (only the paths we read)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    contents: Option<SearchContents>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchContents {
    #[serde(default)]
    tabbed_search_results_renderer: Option<TabbedSearchResultsRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct TabbedSearchResultsRenderer {
    #[serde(default)]
    tabs: Vec<Tab>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tab {
    #[serde(default)]
    tab_renderer: Option<TabRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct TabRenderer {
    #[serde(default)]
    content: Option<TabContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TabContent {
    #[serde(default)]
    section_list_renderer: Option<SectionListRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct SectionListRenderer {
    #[serde(default)]
    contents: Vec<Section>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Section {
    #[serde(default)]
    music_shelf_renderer: Option<MusicShelfRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct MusicShelfRenderer {
    #[serde(default)]
    contents: Vec<ShelfItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShelfItem {
    #[serde(default)]
    music_responsive_list_item_renderer: Option<ListItemRenderer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListItemRenderer {
    #[serde(default)]
    flex_columns: Vec<FlexColumn>,
    #[serde(default)]
    thumbnail: Option<ThumbnailRenderer>,
    #[serde(default)]
    playlist_item_data: Option<PlaylistItemData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlexColumn {
    #[serde(default)]
    music_responsive_list_item_flex_column_renderer: Option<FlexColumnRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct FlexColumnRenderer {
    #[serde(default)]
    text: Option<TextRuns>,
}

#[derive(Debug, Default, Deserialize)]
struct TextRuns {
    #[serde(default)]
    runs: Vec<Run>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Run {
    #[serde(default)]
    text: String,
    #[serde(default)]
    navigation_endpoint: Option<NavigationEndpoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavigationEndpoint {
    #[serde(default)]
    watch_endpoint: Option<WatchEndpoint>,
    #[serde(default)]
    browse_endpoint: Option<BrowseEndpoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchEndpoint {
    #[serde(default)]
    video_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseEndpoint {
    #[serde(default)]
    browse_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThumbnailRenderer {
    #[serde(default)]
    music_thumbnail_renderer: Option<MusicThumbnailRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct MusicThumbnailRenderer {
    #[serde(default)]
    thumbnail: Option<ThumbnailList>,
}

#[derive(Debug, Default, Deserialize)]
struct ThumbnailList {
    #[serde(default)]
    thumbnails: Vec<RawThumbnail>,
}

#[derive(Debug, Default, Deserialize)]
struct RawThumbnail {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemData {
    #[serde(default)]
    video_id: String,
}

// ============================================================================
// Raw suggestions response
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawSuggestionsResponse {
    #[serde(default)]
    contents: Vec<SuggestionsSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionsSection {
    #[serde(default)]
    search_suggestions_section_renderer: Option<SearchSuggestionsSectionRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchSuggestionsSectionRenderer {
    #[serde(default)]
    contents: Vec<SuggestionItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionItem {
    #[serde(default)]
    search_suggestion_renderer: Option<SearchSuggestionRenderer>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchSuggestionRenderer {
    #[serde(default)]
    suggestion: Option<TextRuns>,
}

// ============================================================================
// Parsing
// ============================================================================

fn parse_search_response(response: RawSearchResponse) -> Vec<CatalogSong> {
    let mut songs = Vec::new();

    let Some(tabbed) = response
        .contents
        .and_then(|c| c.tabbed_search_results_renderer)
    else {
        return songs;
    };

    for tab in tabbed.tabs {
        let Some(section_list) = tab
            .tab_renderer
            .and_then(|t| t.content)
            .and_then(|c| c.section_list_renderer)
        else {
            continue;
        };

        for section in section_list.contents {
            let Some(shelf) = section.music_shelf_renderer else {
                continue;
            };
            // Search was filtered to songs, so every shelf item is a song
            for item in shelf.contents {
                if let Some(renderer) = item.music_responsive_list_item_renderer {
                    songs.push(parse_song(renderer));
                }
            }
        }
    }

    songs
}

fn parse_song(renderer: ListItemRenderer) -> CatalogSong {
    let mut song = CatalogSong::default();

    let mut columns = renderer.flex_columns.into_iter();

    // First flex column: title run, which also carries the watch endpoint
    if let Some(runs) = column_runs(columns.next()) {
        if let Some(run) = runs.into_iter().next() {
            if !run.text.is_empty() {
                song.title = Some(run.text);
            }
            song.video_id = run
                .navigation_endpoint
                .and_then(|n| n.watch_endpoint)
                .map(|w| w.video_id)
                .filter(|id| !id.is_empty());
        }
    }

    // Second flex column: artist / album / duration runs separated by " • "
    if let Some(runs) = column_runs(columns.next()) {
        for run in runs {
            let browse_id = run
                .navigation_endpoint
                .as_ref()
                .and_then(|n| n.browse_endpoint.as_ref())
                .map(|b| b.browse_id.as_str());

            match browse_id {
                // Artist channel
                Some(id) if id.starts_with("UC") => song.artists.push(CatalogArtist {
                    name: Some(run.text),
                }),
                // Album browse page
                Some(id) if id.starts_with("MPREb") => {
                    song.album = Some(CatalogAlbum {
                        name: Some(run.text),
                    });
                }
                _ => {
                    if looks_like_duration(&run.text) {
                        song.duration = Some(run.text);
                    }
                }
            }
        }
    }

    if song.video_id.is_none() {
        song.video_id = renderer
            .playlist_item_data
            .map(|d| d.video_id)
            .filter(|id| !id.is_empty());
    }

    song.thumbnails = renderer
        .thumbnail
        .and_then(|t| t.music_thumbnail_renderer)
        .and_then(|r| r.thumbnail)
        .map(|t| {
            t.thumbnails
                .into_iter()
                .filter(|t| !t.url.is_empty())
                .map(|t| CatalogThumbnail { url: t.url })
                .collect()
        })
        .unwrap_or_default();

    song
}

fn column_runs(column: Option<FlexColumn>) -> Option<Vec<Run>> {
    column
        .and_then(|c| c.music_responsive_list_item_flex_column_renderer)
        .and_then(|r| r.text)
        .map(|t| t.runs)
}

/// Duration runs look like "3:45" or "1:02:17"
fn looks_like_duration(text: &str) -> bool {
    text.contains(':') && text.chars().all(|c| c.is_ascii_digit() || c == ':')
}

fn parse_suggestions_response(response: RawSuggestionsResponse) -> Vec<String> {
    let mut suggestions = Vec::new();

    for section in response.contents {
        let Some(renderer) = section.search_suggestions_section_renderer else {
            continue;
        };
        for item in renderer.contents {
            let Some(text) = item
                .search_suggestion_renderer
                .and_then(|r| r.suggestion)
                .map(|s| s.runs.into_iter().map(|r| r.text).collect::<String>())
            else {
                continue;
            };
            if !text.is_empty() {
                suggestions.push(text);
            }
        }
    }

    suggestions
}
