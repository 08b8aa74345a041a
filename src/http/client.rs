use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;

/// HTTP client with built-in rate limiting.
///
/// Shareable across tasks: the limiter sits behind an async mutex so every
/// method takes `&self`.
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: Mutex<RateLimiter>,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = Mutex::new(RateLimiter::new(rate_limit_ms));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        self.send(self.client.get(url), "GET", url).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Response> {
        self.send(self.client.post(url).json(body), "POST", url).await
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Response> {
        self.send(self.client.put(url).json(body), "PUT", url).await
    }

    pub async fn delete(&self, url: &str) -> Result<Response> {
        self.send(self.client.delete(url), "DELETE", url).await
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send(&self, request: RequestBuilder, method: &str, url: &str) -> Result<Response> {
        self.rate_limiter.lock().await.wait().await;
        request
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", method, url))
    }
}
