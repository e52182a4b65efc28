use serde::{Deserialize, Serialize};

/// Cover art URL used when a catalog item carries no thumbnails
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/300?text=No+Image";

// ============================================================================
// Response Types
// ============================================================================

/// A single search result returned to the client
///
/// Every field has a deterministic default so the response schema never omits
/// a key, even when the catalog returns partial data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub duration: String,
}

impl From<CatalogSong> for SearchResultItem {
    fn from(song: CatalogSong) -> Self {
        let artist = if song.artists.is_empty() {
            "Unknown Artist".to_string()
        } else {
            song.artists
                .iter()
                .map(|a| a.name.as_deref().unwrap_or("Unknown"))
                .collect::<Vec<_>>()
                .join(", ")
        };

        // Last thumbnail entry is the highest resolution
        let cover = song
            .thumbnails
            .last()
            .map(|t| t.url.clone())
            .unwrap_or_else(|| PLACEHOLDER_COVER_URL.to_string());

        let album = song
            .album
            .and_then(|a| a.name)
            .unwrap_or_else(|| "Single".to_string());

        Self {
            title: song.title.unwrap_or_else(|| "Unknown Title".to_string()),
            artist,
            album,
            cover,
            video_id: song.video_id.unwrap_or_default(),
            duration: song.duration.unwrap_or_else(|| "0:00".to_string()),
        }
    }
}

/// Resolved audio stream URL returned by the stream endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamResolution {
    #[serde(rename = "streamUrl")]
    pub stream_url: String,
}

// ============================================================================
// Catalog Provider Types
// ============================================================================

/// A song as reported by the catalog search provider
///
/// Every field is optional; defaulting happens in the conversion to
/// [`SearchResultItem`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSong {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
    #[serde(default)]
    pub album: Option<CatalogAlbum>,
    #[serde(default)]
    pub thumbnails: Vec<CatalogThumbnail>,
    #[serde(default, rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogArtist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogAlbum {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogThumbnail {
    pub url: String,
}

// ============================================================================
// Media Resolver Types
// ============================================================================

/// Extraction metadata for a media item, as reported by the resolver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub formats: Vec<MediaFormat>,
}

/// One delivery format of a media item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaFormat {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
}

impl MediaFormat {
    /// Whether this format carries an audio track and no video track.
    ///
    /// The resolver reports absent tracks with the literal codec string
    /// "none": a missing acodec still qualifies as audio, while the vcodec
    /// must be exactly "none".
    pub fn is_audio_only(&self) -> bool {
        self.acodec.as_deref() != Some("none") && self.vcodec.as_deref() == Some("none")
    }
}

impl MediaInfo {
    /// Select a playable audio URL: the first audio-only format in
    /// provider-returned order, falling back to the item's top-level URL.
    pub fn audio_stream_url(&self) -> Option<&str> {
        self.formats
            .iter()
            .find(|f| f.is_audio_only())
            .and_then(|f| f.url.as_deref())
            .or(self.url.as_deref())
    }
}
