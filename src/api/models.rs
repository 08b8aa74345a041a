use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coordinator::ProfileView;
use crate::domain::{Match, Player};
use crate::matches::{HeadToHead, MatchRow, TrendPoint, TrendSummary};
use crate::ranking::{RankedPlayer, Tier};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub player_id: String,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_played: u32,
    pub rating: Option<f64>,
    pub last_match_date: Option<DateTime<Utc>>,
    pub active: bool,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            name: player.name.clone(),
            wins: player.wins,
            losses: player.losses,
            draws: player.draws,
            games_played: player.games_played(),
            rating: player.rating,
            last_match_date: player.last_match_date,
            active: player.active,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// `None` for unranked (New tier) players
    pub rank: Option<usize>,
    pub tier: Tier,
    #[serde(flatten)]
    pub player: PlayerSummary,
}

impl From<&RankedPlayer<'_>> for RankingEntry {
    fn from(entry: &RankedPlayer<'_>) -> Self {
        Self {
            rank: entry.rank.number(),
            tier: entry.tier,
            player: PlayerSummary::from(entry.player),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntry {
    pub match_id: String,
    pub winner_id: String,
    pub winner_name: String,
    pub winner_rating: Option<f64>,
    pub loser_id: String,
    pub loser_name: String,
    pub loser_rating: Option<f64>,
    pub probability: Option<f64>,
    pub date: DateTime<Utc>,
    pub draw: bool,
    pub deletable: bool,
}

impl From<&MatchRow<'_>> for MatchEntry {
    fn from(row: &MatchRow<'_>) -> Self {
        let record: &Match = row.record;
        Self {
            match_id: record.id.clone(),
            winner_id: record.winner_id.clone(),
            winner_name: record.winner_label().to_string(),
            winner_rating: record.winner_rating,
            loser_id: record.loser_id.clone(),
            loser_name: record.loser_label().to_string(),
            loser_rating: record.loser_rating,
            probability: record.probability,
            date: record.date,
            draw: record.draw,
            deletable: row.deletable,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    /// Records the service sent that could not be mapped
    pub skipped: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub player: PlayerSummary,
    pub trend: Vec<TrendPoint>,
    pub summary: Option<TrendSummary>,
    pub matches: Vec<MatchEntry>,
}

impl From<&ProfileView<'_>> for ProfileResponse {
    fn from(view: &ProfileView<'_>) -> Self {
        Self {
            player: PlayerSummary::from(view.player),
            trend: view.trend.clone(),
            summary: view.summary,
            matches: view.rows.iter().map(MatchEntry::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadResponse {
    pub players: Vec<PlayerSummary>,
    /// `results[i][j]`: wins of player i over player j, draws counting half;
    /// `null` on the diagonal
    pub results: Vec<Vec<Option<f64>>>,
}

impl From<&HeadToHead<'_>> for HeadToHeadResponse {
    fn from(matrix: &HeadToHead<'_>) -> Self {
        Self {
            players: matrix.players.iter().map(|p| PlayerSummary::from(*p)).collect(),
            results: matrix
                .cells
                .iter()
                .map(|row| row.iter().map(|cell| cell.score()).collect())
                .collect(),
        }
    }
}

// --- Request Bodies ---

#[derive(Deserialize)]
pub struct CreatePlayerRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdatePlayerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct SubmitMatchRequest {
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub loser: Option<String>,
    #[serde(default)]
    pub draw: bool,
}

#[derive(Deserialize)]
pub struct MatchLogParams {
    #[serde(default)]
    pub delete: bool,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}
