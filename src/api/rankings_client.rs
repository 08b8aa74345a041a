use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;
use urlencoding::encode;

use super::source::RankingsSource;
use crate::config::ServiceSettings;
use crate::domain::{self, Batch, Match, Player};
use crate::errors::with_parse_context;
use crate::http::RateLimitedClient;
use crate::ranking::{Direction, rating_key, sort_stable_by_key};
use crate::submission::{MatchSubmission, NewPlayer, PlayerUpdate};

/// Client for the rankings service REST API
pub struct RankingsClient {
    client: RateLimitedClient,
    base_url: String,
}

impl RankingsClient {
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Helper Methods ---

    fn build_players_url(&self) -> String {
        format!("{}/players", self.base_url)
    }

    fn build_player_url(&self, player_id: &str) -> String {
        format!("{}/players/{}", self.base_url, encode(player_id))
    }

    fn build_player_matches_url(&self, player_id: &str) -> String {
        format!("{}/players/{}/matches", self.base_url, encode(player_id))
    }

    fn build_matches_url(&self) -> String {
        format!("{}/matches", self.base_url)
    }

    fn build_match_url(&self, match_id: &str) -> String {
        format!("{}/matches/{}", self.base_url, encode(match_id))
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).await?;
        let response = Self::ensure_success(response, "GET", url).await?;
        Self::read_json(response, url).await
    }

    async fn read_json(response: reqwest::Response, url: &str) -> Result<Value> {
        with_parse_context(response.json::<Value>().await, &format!("response from {}", url))
    }

    /// Non-success statuses become errors carrying the service's own message
    async fn ensure_success(
        response: reqwest::Response,
        method: &str,
        url: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{} {} rejected with {}: {}", method, url, status, body);
        anyhow::bail!("Rankings service returned {} for {} {}: {}", status, method, url, body.trim())
    }
}

impl RankingsSource for RankingsClient {
    /// Players sorted by rating descending, the service's listing default
    async fn fetch_players(&self) -> Result<Batch<Player>> {
        let url = self.build_players_url();
        let value = self.get_json(&url).await?;
        let mut batch = with_parse_context(domain::decode_players(value), "player list")?;

        sort_stable_by_key(&mut batch.items, Direction::Descending, |p| rating_key(p.rating));
        info!("Fetched {} players ({} skipped)", batch.items.len(), batch.skipped.len());
        Ok(batch)
    }

    async fn fetch_player(&self, player_id: &str) -> Result<Player> {
        let url = self.build_player_url(player_id);
        let value = self.get_json(&url).await?;
        with_parse_context(domain::decode_player(value), "player")
    }

    async fn fetch_player_matches(&self, player_id: &str) -> Result<Batch<Match>> {
        let url = self.build_player_matches_url(player_id);
        let value = self.get_json(&url).await?;
        let batch = with_parse_context(domain::decode_matches(value), "player match list")?;
        info!("Fetched {} matches for player {}", batch.items.len(), player_id);
        Ok(batch)
    }

    async fn fetch_matches(&self) -> Result<Batch<Match>> {
        let url = self.build_matches_url();
        let value = self.get_json(&url).await?;
        let batch = with_parse_context(domain::decode_matches(value), "match list")?;
        info!("Fetched {} matches ({} skipped)", batch.items.len(), batch.skipped.len());
        Ok(batch)
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<Player> {
        let url = self.build_players_url();
        let response = self.client.post_json(&url, player).await?;
        let response = Self::ensure_success(response, "POST", &url).await?;
        let value: Value = response.json().await.context("Failed to read created player")?;

        let created = with_parse_context(domain::decode_player(value), "created player")?;
        info!("Created player {} ({})", created.name, created.id);
        Ok(created)
    }

    async fn update_player(&self, update: &PlayerUpdate) -> Result<Player> {
        let url = self.build_players_url();
        let response = self.client.put_json(&url, update).await?;
        let response = Self::ensure_success(response, "PUT", &url).await?;
        let value: Value = response.json().await.context("Failed to read updated player")?;

        let updated = with_parse_context(domain::decode_player(value), "updated player")?;
        info!("Updated player {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    async fn delete_player(&self, player_id: &str) -> Result<()> {
        let url = self.build_player_url(player_id);
        let response = self.client.delete(&url).await?;
        Self::ensure_success(response, "DELETE", &url).await?;
        info!("Deleted player {}", player_id);
        Ok(())
    }

    async fn submit_match(&self, submission: &MatchSubmission) -> Result<Match> {
        let url = self.build_matches_url();
        let response = self.client.post_json(&url, &submission.body()).await?;
        let response = Self::ensure_success(response, "POST", &url).await?;
        let value: Value = response.json().await.context("Failed to read submitted match")?;

        let created = with_parse_context(domain::decode_match(value), "submitted match")?;
        info!(
            "Submitted match {}: {} beat {}",
            created.id, created.winner_id, created.loser_id
        );
        Ok(created)
    }

    async fn delete_match(&self, match_id: &str) -> Result<()> {
        let url = self.build_match_url(match_id);
        let response = self.client.delete(&url).await?;
        Self::ensure_success(response, "DELETE", &url).await?;
        info!("Deleted match {}", match_id);
        Ok(())
    }
}
