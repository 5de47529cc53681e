//! Discogs collection access.
//!
//! The vinyl collection and wantlist live in Discogs; this module pulls
//! them fully into memory behind the [`CollectionService`] capability so
//! the analysis engine never touches HTTP itself.

mod client;
mod models;

pub use client::DiscogsClient;
pub use models::{Collection, DataError, Release, WantlistEntry};

use anyhow::Result;
use async_trait::async_trait;

/// Capability interface over the user's Discogs data.
///
/// Implemented by [`DiscogsClient`] in production and by stubs in tests;
/// consumers receive it injected, never through globals.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait CollectionService: Send + Sync {
    /// The user's vinyl collection, in the order Discogs returns it
    /// (oldest addition first). `limit` takes a prefix; `None` drains
    /// every page.
    async fn collection(&self, limit: Option<usize>) -> Result<Collection>;

    /// The user's wantlist.
    async fn wantlist(&self, limit: Option<usize>) -> Result<Vec<WantlistEntry>>;
}
