/// yt-dlp media resolver
///
/// Spawns the yt-dlp binary with `--dump-single-json` and parses its metadata
/// output. The media itself is never downloaded.
use std::path::PathBuf;

use tokio::process::Command;

use crate::{
    error::{AppError, AppResult},
    models::MediaInfo,
    services::providers::MediaResolver,
};

pub struct YtDlpResolver {
    binary: PathBuf,
}

impl YtDlpResolver {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait::async_trait]
impl MediaResolver for YtDlpResolver {
    async fn resolve(&self, url: &str) -> AppResult<MediaInfo> {
        tracing::debug!(url = %url, "Running yt-dlp");

        let output = Command::new(&self.binary)
            .args([
                "--dump-single-json",
                "--no-download",
                "--no-warnings",
                "--no-progress",
                url,
            ])
            .output()
            .await
            .map_err(|e| AppError::Resolver(format!("Failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Resolver(format!(
                "yt-dlp failed: {}",
                stderr.lines().next().unwrap_or("Unknown error")
            )));
        }

        let info: MediaInfo = serde_json::from_slice(&output.stdout)
            .map_err(|e| AppError::Resolver(format!("Failed to parse yt-dlp output: {e}")))?;

        tracing::debug!(
            url = %url,
            formats = info.formats.len(),
            provider = "ytdlp",
            "Formats extracted"
        );

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_a_resolver_error() {
        let resolver = YtDlpResolver::new("/nonexistent/yt-dlp");
        let result = resolver
            .resolve("https://www.youtube.com/watch?v=abc123")
            .await;

        match result {
            Err(AppError::Resolver(msg)) => assert!(msg.contains("Failed to run yt-dlp")),
            other => panic!("expected resolver error, got {other:?}"),
        }
    }

    #[test]
    fn test_media_info_parses_ytdlp_output() {
        // Trimmed-down shape of a real --dump-single-json payload
        let info: MediaInfo = serde_json::from_str(
            r#"{
                "id": "abc123",
                "title": "Some Song",
                "url": "https://media.example/fallback",
                "formats": [
                    {"format_id": "18", "url": "https://media.example/muxed", "acodec": "mp4a.40.2", "vcodec": "avc1.42001E"},
                    {"format_id": "251", "url": "https://media.example/opus", "acodec": "opus", "vcodec": "none", "abr": 160.0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(info.formats.len(), 2);
        assert_eq!(info.audio_stream_url(), Some("https://media.example/opus"));
    }
}
