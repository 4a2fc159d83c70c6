use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;

/// HTTP client with built-in rate limiting and bearer authentication.
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        rate_limit_ms: u64,
        bearer_token: Option<&str>,
    ) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs, bearer_token)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&mut self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.send_get_request(url).await
    }

    fn build_client(
        user_agent: &str,
        timeout_secs: u64,
        bearer_token: Option<&str>,
    ) -> Result<Client> {
        let mut headers = HeaderMap::new();
        if let Some(token) = bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("API token is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }
}
