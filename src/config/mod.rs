//! Configuration resolution.
//!
//! Credentials and settings arrive through an explicit TOML file plus CLI
//! arguments; nothing reads the process environment. TOML values override
//! CLI values where present.

mod file_config;

pub use file_config::{DiscogsConfig, FileConfig, SpotifyConfig};

use anyhow::{bail, Result};

pub const SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DISCOGS_API_BASE_URL: &str = "https://api.discogs.com";

/// CLI arguments that participate in config resolution.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub request_timeout_sec: u64,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub request_timeout_sec: u64,
    pub spotify: SpotifySettings,
    pub discogs: DiscogsSettings,
}

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub access_token: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone)]
pub struct DiscogsSettings {
    pub token: String,
    pub username: String,
    pub api_base_url: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and the TOML file config.
    /// Credentials live in the file only; missing ones fail resolution.
    pub fn resolve(cli: &CliConfig, file: FileConfig) -> Result<Self> {
        let port = file.port.unwrap_or(cli.port);
        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);

        let spotify_file = file.spotify.unwrap_or_default();
        let access_token = match spotify_file.access_token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => bail!("spotify.access_token must be set in the config file"),
        };
        let spotify = SpotifySettings {
            access_token,
            api_base_url: spotify_file
                .api_base_url
                .unwrap_or_else(|| SPOTIFY_API_BASE_URL.to_string()),
        };

        let discogs_file = file.discogs.unwrap_or_default();
        let token = match discogs_file.token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => bail!("discogs.token must be set in the config file"),
        };
        let username = match discogs_file.username.filter(|u| !u.is_empty()) {
            Some(username) => username,
            None => bail!("discogs.username must be set in the config file"),
        };
        let discogs = DiscogsSettings {
            token,
            username,
            api_base_url: discogs_file
                .api_base_url
                .unwrap_or_else(|| DISCOGS_API_BASE_URL.to_string()),
        };

        Ok(Self {
            port,
            request_timeout_sec,
            spotify,
            discogs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> CliConfig {
        CliConfig {
            port: 3001,
            request_timeout_sec: 30,
        }
    }

    fn full_file() -> FileConfig {
        toml::from_str(
            r#"
            [spotify]
            access_token = "sp-token"

            [discogs]
            token = "dc-token"
            username = "digger"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let config = AppConfig::resolve(&cli(), full_file()).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.spotify.api_base_url, SPOTIFY_API_BASE_URL);
        assert_eq!(config.discogs.api_base_url, DISCOGS_API_BASE_URL);
        assert_eq!(config.discogs.username, "digger");
    }

    #[test]
    fn test_file_overrides_cli_port() {
        let mut file = full_file();
        file.port = Some(9999);

        let config = AppConfig::resolve(&cli(), file).unwrap();
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn test_missing_credentials_fail() {
        let no_spotify: FileConfig = toml::from_str(
            r#"
            [discogs]
            token = "dc-token"
            username = "digger"
            "#,
        )
        .unwrap();
        assert!(AppConfig::resolve(&cli(), no_spotify).is_err());

        let no_discogs_user: FileConfig = toml::from_str(
            r#"
            [spotify]
            access_token = "sp-token"

            [discogs]
            token = "dc-token"
            "#,
        )
        .unwrap();
        assert!(AppConfig::resolve(&cli(), no_discogs_user).is_err());
    }
}
