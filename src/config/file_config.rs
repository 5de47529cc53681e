use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub port: Option<u16>,
    pub request_timeout_sec: Option<u64>,

    // Service credentials
    pub spotify: Option<SpotifyConfig>,
    pub discogs: Option<DiscogsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SpotifyConfig {
    /// OAuth bearer token, acquired out of band
    pub access_token: Option<String>,
    /// Override for tests and proxies
    pub api_base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct DiscogsConfig {
    /// Personal access token
    pub token: Option<String>,
    /// Username owning the collection
    pub username: Option<String>,
    /// Override for tests and proxies
    pub api_base_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
