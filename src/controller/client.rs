//! Controller HTTP client for API interactions

use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::config::api;
use crate::error::{AuditError, Result};

use super::ResourcePage;

/// AWX/AAP controller API client
///
/// Wraps a reqwest client with basic-auth credentials and the base URL.
/// All requests are sequential; the client holds no per-request state.
pub struct ControllerClient {
    client: Client,
    username: String,
    password: String,
    host: String,
    port: u16,
    /// Custom base URL override (for testing with mock servers)
    base_url_override: Option<String>,
}

impl ControllerClient {
    /// Create a new controller client
    ///
    /// `insecure` disables TLS certificate verification, matching
    /// controllers deployed with self-signed certificates.
    pub fn new(
        host: String,
        port: u16,
        username: String,
        password: String,
        insecure: bool,
    ) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(insecure)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            username,
            password,
            host,
            port,
            base_url_override: None,
        })
    }

    /// Create a client with custom base URL (for testing with mock servers)
    #[cfg(test)]
    pub fn with_base_url(username: String, password: String, base_url: String) -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            username,
            password,
            host: "mock.controller".to_string(),
            port: 443,
            base_url_override: Some(base_url),
        }
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        if let Some(ref url) = self.base_url_override {
            return format!("{}{}", url.trim_end_matches('/'), api::BASE_PATH);
        }
        format!("https://{}:{}{}", self.host, self.port, api::BASE_PATH)
    }

    /// Create a GET request builder with basic auth
    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Parse an API response, returning an error for non-success status codes
    async fn parse_api_response<T>(&self, response: reqwest::Response, context: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::Api {
                status: status.as_u16(),
                message: format!("Failed to fetch {}", context),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetch one page of a paginated listing
    ///
    /// `path` is relative to the API base, e.g. `projects` or
    /// `teams/5/users`. `context` labels error messages.
    pub async fn get_page(
        &self,
        path: &str,
        page: u64,
        page_size: u32,
        context: &str,
    ) -> Result<ResourcePage> {
        let url = format!(
            "{}/{}?page={}&page_size={}",
            self.base_url(),
            path,
            page,
            page_size
        );
        debug!("Fetching page {} from: {}", page, url);

        let response = self.get(&url).send().await?;
        let page_context = format!("{} (page {})", context, page);
        self.parse_api_response(response, &page_context).await
    }

    /// Fetch a single non-paginated object, e.g. `organizations/7`
    pub async fn get_object(&self, path: &str, context: &str) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.base_url(), path);
        debug!("Fetching {} from: {}", context, url);

        let response = self.get(&url).send().await?;
        self.parse_api_response(response, context).await
    }

    /// Raw status probe against an API path, used by preflight
    pub(crate) async fn get_raw(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.base_url(), path);
        debug!("Probing: {}", url);
        Ok(self.get(&url).send().await?)
    }
}

#[cfg(test)]
impl ControllerClient {
    /// Create a test client pointed at a wiremock server
    pub fn test_client(base_url: &str) -> Self {
        Self::with_base_url(
            "admin".to_string(),
            "test-password".to_string(),
            base_url.to_string(),
        )
    }
}
