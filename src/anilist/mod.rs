use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::genre::GenreQuery;

pub mod client;

pub use client::AniListClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

/// One anime record from the AniList `Page.media` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    pub title: MediaTitle,
    pub genres: Vec<String>,
    /// May contain inline HTML (`<br>`, `<i>`)
    pub description: Option<String>,
}

/// Anything that can turn a genre query into candidate anime.
///
/// An empty `Vec` is a successful lookup with no matches, not an error.
#[async_trait::async_trait]
pub trait RecommendationSource {
    async fn fetch(&self, query: &GenreQuery) -> Result<Vec<MediaItem>>;
}
