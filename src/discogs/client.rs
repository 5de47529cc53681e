//! HTTP client for the Discogs API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::models::{Collection, CollectionPageWire, WantlistPageWire};
use super::{CollectionService, Release, WantlistEntry};

/// Discogs caps page size at 100 items.
const PER_PAGE: usize = 100;

/// HTTP client for the user's Discogs collection and wantlist.
pub struct DiscogsClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    token: String,
}

impl DiscogsClient {
    /// Create a new Discogs client.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g., "https://api.discogs.com")
    /// * `username` - Discogs username owning the collection
    /// * `token` - personal access token
    /// * `timeout_sec` - request timeout in seconds
    pub fn new(base_url: String, username: String, token: String, timeout_sec: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            // Discogs rejects requests without an identifying user agent
            .user_agent(concat!("vinyl-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            username,
            token,
        }
    }

    async fn get_page<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        page: usize,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Discogs token={}", self.token))
            .query(&[
                ("page", page.to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("sort", "added".to_string()),
                ("sort_order", "asc".to_string()),
            ])
            .send()
            .await
            .context("Failed to connect to Discogs")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Discogs request {} failed: status {}",
                path,
                response.status()
            );
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse Discogs response for {}", path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CollectionService for DiscogsClient {
    async fn collection(&self, limit: Option<usize>) -> Result<Collection> {
        let path = format!(
            "/users/{}/collection/folders/0/releases",
            urlencoding::encode(&self.username)
        );

        let mut releases: Vec<Release> = Vec::new();
        let mut total = 0;
        let mut page = 1;

        loop {
            let body: CollectionPageWire = self.get_page(&path, page).await?;
            total = body.pagination.items;

            for wire in body.releases {
                releases.push(wire.into_release()?);
                if limit.is_some_and(|limit| releases.len() >= limit) {
                    debug!("Collection fetch stopped at requested limit {:?}", limit);
                    return Ok(Collection { releases, total });
                }
            }

            if body.pagination.page >= body.pagination.pages {
                break;
            }
            page += 1;
        }

        debug!(
            "Fetched {} of {} collection releases",
            releases.len(),
            total
        );
        Ok(Collection { releases, total })
    }

    async fn wantlist(&self, limit: Option<usize>) -> Result<Vec<WantlistEntry>> {
        let path = format!("/users/{}/wants", urlencoding::encode(&self.username));

        let mut wants: Vec<WantlistEntry> = Vec::new();
        let mut page = 1;

        loop {
            let body: WantlistPageWire = self.get_page(&path, page).await?;

            for wire in body.wants {
                wants.push(wire.into_entry()?);
                if limit.is_some_and(|limit| wants.len() >= limit) {
                    return Ok(wants);
                }
            }

            if body.pagination.page >= body.pagination.pages {
                break;
            }
            page += 1;
        }

        Ok(wants)
    }
}
