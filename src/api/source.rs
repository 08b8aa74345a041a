use anyhow::Result;
use std::future::Future;

use crate::domain::{Batch, Match, Player};
use crate::submission::{MatchSubmission, NewPlayer, PlayerUpdate};

/// Everything the presentation layer needs from the rankings service
pub trait RankingsSource {
    fn fetch_players(&self) -> impl Future<Output = Result<Batch<Player>>> + Send;

    fn fetch_player(&self, player_id: &str) -> impl Future<Output = Result<Player>> + Send;

    fn fetch_player_matches(
        &self,
        player_id: &str,
    ) -> impl Future<Output = Result<Batch<Match>>> + Send;

    fn fetch_matches(&self) -> impl Future<Output = Result<Batch<Match>>> + Send;

    fn create_player(&self, player: &NewPlayer) -> impl Future<Output = Result<Player>> + Send;

    fn update_player(&self, update: &PlayerUpdate) -> impl Future<Output = Result<Player>> + Send;

    /// Removes the player together with every match they took part in
    fn delete_player(&self, player_id: &str) -> impl Future<Output = Result<()>> + Send;

    fn submit_match(
        &self,
        submission: &MatchSubmission,
    ) -> impl Future<Output = Result<Match>> + Send;

    fn delete_match(&self, match_id: &str) -> impl Future<Output = Result<()>> + Send;
}
