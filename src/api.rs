//! HTTP client for the backend's listing endpoints.
//!
//! Only the two read-only listings the core needs: cars and agents. Both
//! return JSON arrays; anything else is treated as an empty listing.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::directory::AgentSource;
use crate::model::{Agent, Car};

const CARS_PATH: &str = "/cars.php";
const AGENTS_PATH: &str = "/agents.php";

/// Errors that can occur talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned HTTP {status}")]
    Status { path: &'static str, status: u16 },

    #[error("invalid listing from {path}: {source}")]
    Json {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = core::result::Result<T, ApiError>;

/// Client for the backend API.
///
/// Cheap to clone: clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// `GET /cars.php`.
    pub async fn fetch_cars(&self) -> Result<Vec<Car>> {
        self.list(CARS_PATH).await
    }

    /// `GET /agents.php`.
    pub async fn fetch_agents(&self) -> Result<Vec<Agent>> {
        self.list(AGENTS_PATH).await
    }

    async fn list<T: DeserializeOwned>(&self, path: &'static str) -> Result<Vec<T>> {
        let response = self.request(path).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        decode_listing(path, body)
    }

    /// A `GET` for `path`, carrying the bearer token when one is set.
    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(self.url(path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AgentSource for ApiClient {
    async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.fetch_agents().await
    }
}

/// Decode a listing body. A non-array body is an empty listing.
fn decode_listing<T: DeserializeOwned>(path: &'static str, body: Value) -> Result<Vec<T>> {
    match body {
        items @ Value::Array(_) => {
            serde_json::from_value(items).map_err(|source| ApiError::Json { path, source })
        }
        _ => {
            log::warn!("{path} did not return an array; treating it as empty");
            Ok(Vec::new())
        }
    }
}
