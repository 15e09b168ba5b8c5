use reqwest::{Client, ClientBuilder, StatusCode, header};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::anilist::{MediaItem, RecommendationSource};
use crate::config::AniListConfig;
use crate::error::{Error, Result};
use crate::genre::GenreQuery;

const MEDIA_BY_GENRE_QUERY: &str = r#"
query ($page: Int, $perPage: Int, $genres: [String]) {
  Page(page: $page, perPage: $perPage) {
    media(type: ANIME, genre_in: $genres) {
      id
      title {
        romaji
        english
      }
      genres
      description
    }
  }
}
"#;

pub struct AniListClient {
    client: Client,
    endpoint: String,
    page: u32,
    per_page: u32,
}

impl AniListClient {
    pub fn new(config: &AniListConfig) -> Self {
        Self::with_builder(config, Client::builder())
    }

    pub fn with_builder(config: &AniListConfig, builder: ClientBuilder) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = builder
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: config.endpoint.clone(),
            page: config.page,
            per_page: config.per_page,
        }
    }

    fn request_body(&self, query: &GenreQuery) -> Result<Vec<u8>> {
        let request = GraphQlRequest {
            query: MEDIA_BY_GENRE_QUERY,
            variables: PageVariables {
                page: self.page,
                per_page: self.per_page,
                genres: query.as_filter(),
            },
        };
        Ok(serde_json::to_vec(&request)?)
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: PageVariables<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageVariables<'a> {
    page: u32,
    per_page: u32,
    genres: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: MediaPage,
}

#[derive(Deserialize)]
struct MediaPage {
    media: Vec<MediaItem>,
}

/// Decode a `Page.media` response body.
///
/// GraphQL errors win over the HTTP status since AniList reports them with a
/// 4xx and a JSON body. A body that is not JSON at all on a failing status is
/// reported as the status.
fn decode_media_page(status: StatusCode, body: &[u8]) -> Result<Vec<MediaItem>> {
    let response: GraphQlResponse = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(_) if !status.is_success() => return Err(Error::Http(status)),
        Err(e) => return Err(Error::Parse(e)),
    };

    if !response.errors.is_empty() {
        let message = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(Error::Api(message));
    }

    if !status.is_success() {
        return Err(Error::Http(status));
    }

    let data: PageData = serde_json::from_value(response.data.unwrap_or_default())?;
    Ok(data.page.media)
}

#[async_trait::async_trait]
impl RecommendationSource for AniListClient {
    async fn fetch(&self, query: &GenreQuery) -> Result<Vec<MediaItem>> {
        debug!(genres = ?query.genres(), endpoint = %self.endpoint, "Querying AniList");

        let response = self
            .client
            .post(&self.endpoint)
            .body(self.request_body(query)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!(status = %status, "AniList responded with an error status");
        }

        let media = decode_media_page(status, &body)?;
        debug!(count = media.len(), "AniList returned media");
        Ok(media)
    }
}
