//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::sync::Arc;

use tracing::debug;

use reelname_core::types::MediaKind;

use crate::provider::MetadataProvider;
use crate::rate_limit::RateLimiter;
use crate::{EpisodeRecord, MetadataError, MovieRecord, RemoteMediaRecord, TvShowRecord};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    limiter: Arc<RateLimiter>,
}

impl TmdbClient {
    pub fn new(api_key: String, limiter: Arc<RateLimiter>) -> Self {
        Self {
            api_key,
            base_url: BASE_URL.to_string(),
            client: reqwest::Client::new(),
            limiter,
        }
    }

    /// Point the client at another service root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);

        self.limiter.acquire().await;
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search(
        &self,
        title: &str,
        kind: MediaKind,
    ) -> Result<RemoteMediaRecord, MetadataError> {
        let path = match kind {
            MediaKind::Tv => "/search/tv",
            MediaKind::Movie => "/search/movie",
        };
        let data = self.get_json(path, &[("query", title)]).await?;
        parse_first_result(kind, &data)
    }

    async fn fetch_episode(
        &self,
        show_id: u64,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeRecord, MetadataError> {
        let data = self
            .get_json(
                &format!("/tv/{show_id}/season/{season}/episode/{episode}"),
                &[],
            )
            .await?;
        parse_episode(&data)
    }
}

fn parse_first_result(
    kind: MediaKind,
    data: &serde_json::Value,
) -> Result<RemoteMediaRecord, MetadataError> {
    let first = data["results"]
        .as_array()
        .and_then(|r| r.first())
        .ok_or(MetadataError::NotFound)?;

    let id = first["id"]
        .as_u64()
        .ok_or_else(|| MetadataError::Provider("search result without id".into()))?;

    match kind {
        MediaKind::Tv => Ok(RemoteMediaRecord::Tv(TvShowRecord {
            id,
            name: required_str(first, "name")?,
            air_date: first["air_date"]
                .as_str()
                .or_else(|| first["first_air_date"].as_str())
                .map(|s| s.to_string()),
        })),
        MediaKind::Movie => Ok(RemoteMediaRecord::Movie(MovieRecord {
            id,
            title: required_str(first, "title")?,
            release_date: first["release_date"].as_str().map(|s| s.to_string()),
        })),
    }
}

fn parse_episode(data: &serde_json::Value) -> Result<EpisodeRecord, MetadataError> {
    Ok(EpisodeRecord {
        id: data["id"]
            .as_u64()
            .ok_or_else(|| MetadataError::Provider("episode without id".into()))?,
        name: data["name"].as_str().map(|s| s.to_string()),
        air_date: data["air_date"].as_str().map(|s| s.to_string()),
        season_number: data["season_number"]
            .as_u64()
            .and_then(|n| u32::try_from(n).ok()),
        episode_number: data["episode_number"]
            .as_u64()
            .and_then(|n| u32::try_from(n).ok()),
    })
}

fn required_str(value: &serde_json::Value, key: &str) -> Result<String, MetadataError> {
    value[key]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| MetadataError::Provider(format!("search result without '{key}'")))
}
