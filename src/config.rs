use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// YouTube Music InnerTube API base URL
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Path to the yt-dlp binary used for stream resolution
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_catalog_api_url() -> String {
    "https://music.youtube.com/youtubei/v1".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = envy::from_iter(std::iter::empty::<(String, String)>()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5001);
        assert_eq!(config.ytdlp_path, "yt-dlp");
    }

    #[test]
    fn test_port_override() {
        let config: Config =
            envy::from_iter(vec![("PORT".to_string(), "8080".to_string())]).unwrap();
        assert_eq!(config.port, 8080);
    }
}
