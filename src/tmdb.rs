use std::{num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

/// A candidate returned by a title search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// The full record for a single provider movie.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub original_title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("movie provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("movie provider returned {0}")]
    Status(StatusCode),
    #[error("movie {0} is not known to the provider")]
    UnknownMovie(u64),
    #[error("movie provider sent a malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn search(&self, title: &str) -> Result<Vec<SearchResult>, ProviderError>;
    async fn movie(&self, id: u64) -> Result<MovieDetails, ProviderError>;
}

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, api_key, base_url, limiter }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        self.limiter.until_ready().await;

        let resp = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn search(&self, title: &str) -> Result<Vec<SearchResult>, ProviderError> {
        debug!(title = %title, "searching provider");
        let resp: SearchResponse =
            self.get_json(self.url("search/movie"), &[("query", title)]).await?;
        debug!(title = %title, results = resp.results.len(), "provider search finished");
        Ok(resp.results)
    }

    async fn movie(&self, id: u64) -> Result<MovieDetails, ProviderError> {
        debug!(provider_id = id, "fetching provider movie");
        match self.get_json(self.url(&format!("movie/{id}")), &[]).await {
            Err(ProviderError::Status(status)) if status == StatusCode::NOT_FOUND => {
                Err(ProviderError::UnknownMovie(id))
            },
            other => other,
        }
    }
}
