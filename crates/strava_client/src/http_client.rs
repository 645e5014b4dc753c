//! HTTP client implementation for the Strava API.
//!
//! This module provides a reqwest-based implementation of the [`ActivitySource`](crate::ActivitySource) trait.

use crate::config::ClientConfig;
use crate::{ActivityRecord, ActivitySource, StravaError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_BASE_URL: &str = "https://www.strava.com/api/v3";

/// Client for the Strava v3 API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestStravaClient {
    base_url: String,
    access_token: SecretString,
    client: reqwest::Client,
}

impl ReqwestStravaClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The API root (e.g., "https://www.strava.com/api/v3")
    /// * `access_token` - Bearer token sent with every request
    pub fn new(base_url: &str, access_token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("run-club-tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            client,
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(&cfg.base_url, cfg.access_token.clone())
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.access_token.expose_secret())
    }

    /// Execute a request and decode a JSON body, keeping a snippet of the
    /// body in the error when it doesn't match the expected shape.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StravaError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        let text = resp.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(512).collect();
            StravaError::Decode(format!("{} - body: {}", e, body_snippet))
        })
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> StravaError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(512).collect();
        StravaError::from_status(status, body_snippet)
    }
}

#[async_trait]
impl ActivitySource for ReqwestStravaClient {
    async fn list_activities_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ActivityRecord>, StravaError> {
        let url = format!("{}/athlete/activities", self.base_url);
        let qp = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        tracing::debug!(url = %url, per_page, page, "requesting activity page");
        self.execute_json(self.get_request(&url).query(&qp)).await
    }
}
