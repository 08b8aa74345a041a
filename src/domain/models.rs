use chrono::{DateTime, Utc};
use serde::Serialize;

pub type PlayerId = String;
pub type MatchId = String;

/// Player as reported by the rankings service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub rating: Option<f64>,
    pub last_match_date: Option<DateTime<Utc>>,
    /// Cleared when a player is retired from the league
    pub active: bool,
}

impl Player {
    /// Decided games only. Draws never count towards tier thresholds.
    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }
}

/// Resolved match record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub id: MatchId,
    pub winner_id: PlayerId,
    pub winner_name: Option<String>,
    pub loser_id: PlayerId,
    pub loser_name: Option<String>,
    pub winner_rating: Option<f64>,
    pub loser_rating: Option<f64>,
    pub probability: Option<f64>,
    pub date: DateTime<Utc>,
    pub draw: bool,
}

impl Match {
    pub fn involves(&self, player_id: &str) -> bool {
        self.winner_id == player_id || self.loser_id == player_id
    }

    pub fn is_winner(&self, player_id: &str) -> bool {
        self.winner_id == player_id
    }

    /// Rating snapshot of the given participant at resolution time
    pub fn rating_snapshot_for(&self, player_id: &str) -> Option<f64> {
        if self.is_winner(player_id) {
            self.winner_rating
        } else if self.loser_id == player_id {
            self.loser_rating
        } else {
            None
        }
    }

    pub fn winner_label(&self) -> &str {
        self.winner_name.as_deref().unwrap_or(&self.winner_id)
    }

    pub fn loser_label(&self) -> &str {
        self.loser_name.as_deref().unwrap_or(&self.loser_id)
    }
}
