use anyhow::{Context, Result};
use reqwest::{Client, Method, Response};
use tracing::debug;

use crate::fixtures;

/// HTTP request builder over the leaderboard API base URL.
///
/// The base is a fixed template ending in `/ru/api/`; endpoint paths are
/// appended verbatim. Verbs are a small enumerated set of methods, each
/// forwarding to one internal `request` helper.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Client over the default deployment base (honors `LEADERBOARD_BASE_URL`).
    pub fn new() -> Self {
        Self::with_base(fixtures::api_base_url())
    }

    /// Client over an explicit API base URL.
    pub fn with_base(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        ApiClient {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(&self, method: Method, path: &str) -> Result<Response> {
        let url = self.url_for(path);
        debug!("{} {}", method, url);
        let response = self
            .http
            .request(method.clone(), &url)
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, url))?;
        Ok(response)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.request(Method::GET, path).await
    }

    pub async fn post(&self, path: &str) -> Result<Response> {
        self.request(Method::POST, path).await
    }

    pub async fn put(&self, path: &str) -> Result<Response> {
        self.request(Method::PUT, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.request(Method::DELETE, path).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
