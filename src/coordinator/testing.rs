//! In-memory rankings service shared by the coordinator, console and server tests.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Mutex, MutexGuard};

use crate::api::RankingsSource;
use crate::domain::{Batch, Match, Player};
use crate::submission::{MatchSubmission, NewPlayer, PlayerUpdate};

#[derive(Default)]
pub struct FakeState {
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub fail_reads: bool,
    pub reject_writes: bool,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeSource {
    pub state: Mutex<FakeState>,
}

impl FakeSource {
    pub fn with(players: Vec<Player>, matches: Vec<Match>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                players,
                matches,
                ..FakeState::default()
            }),
        }
    }

    pub fn set(&self, change: impl FnOnce(&mut FakeState)) {
        change(&mut self.state.lock().unwrap());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn read(&self, call: String) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.fail_reads {
            anyhow::bail!("service unavailable");
        }
        Ok(state)
    }

    fn write(&self, call: String) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.reject_writes {
            anyhow::bail!("Rankings service returned 400 Bad Request");
        }
        Ok(state)
    }
}

impl RankingsSource for FakeSource {
    async fn fetch_players(&self) -> Result<Batch<Player>> {
        let state = self.read("GET /players".to_string())?;
        Ok(Batch::new(state.players.clone()))
    }

    async fn fetch_player(&self, player_id: &str) -> Result<Player> {
        let state = self.read(format!("GET /players/{}", player_id))?;
        state
            .players
            .iter()
            .find(|p| p.id == player_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown player {}", player_id))
    }

    async fn fetch_player_matches(&self, player_id: &str) -> Result<Batch<Match>> {
        let state = self.read(format!("GET /players/{}/matches", player_id))?;
        let own = state
            .matches
            .iter()
            .filter(|m| m.involves(player_id))
            .cloned()
            .collect();
        Ok(Batch::new(own))
    }

    async fn fetch_matches(&self) -> Result<Batch<Match>> {
        let state = self.read("GET /matches".to_string())?;
        Ok(Batch::new(state.matches.clone()))
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<Player> {
        let mut state = self.write("POST /players".to_string())?;
        let mut created = person(&format!("{}", state.players.len() + 1), &player.name, 1000.0, 0, 0);
        created.last_match_date = None;
        state.players.push(created.clone());
        Ok(created)
    }

    async fn update_player(&self, update: &PlayerUpdate) -> Result<Player> {
        let mut state = self.write("PUT /players".to_string())?;
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| anyhow::anyhow!("unknown player {}", update.id))?;
        player.name = update.name.clone();
        player.active = update.active;
        Ok(player.clone())
    }

    async fn delete_player(&self, player_id: &str) -> Result<()> {
        let mut state = self.write(format!("DELETE /players/{}", player_id))?;
        state.players.retain(|p| p.id != player_id);
        state.matches.retain(|m| !m.involves(player_id));
        Ok(())
    }

    async fn submit_match(&self, submission: &MatchSubmission) -> Result<Match> {
        let mut state = self.write("POST /matches".to_string())?;
        let mut created = game(
            &format!("m{}", state.matches.len() + 1),
            &submission.winner_id,
            &submission.loser_id,
            10,
        );
        created.draw = submission.draw;
        state.matches.push(created.clone());
        Ok(created)
    }

    async fn delete_match(&self, match_id: &str) -> Result<()> {
        let mut state = self.write(format!("DELETE /matches/{}", match_id))?;
        state.matches.retain(|m| m.id != match_id);
        Ok(())
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn person(id: &str, name: &str, rating: f64, wins: u32, losses: u32) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        wins,
        losses,
        draws: 0,
        rating: Some(rating),
        last_match_date: Some(now() - Duration::days(3)),
        active: true,
    }
}

pub fn game(id: &str, winner: &str, loser: &str, day: u32) -> Match {
    Match {
        id: id.to_string(),
        winner_id: winner.to_string(),
        winner_name: None,
        loser_id: loser.to_string(),
        loser_name: None,
        winner_rating: Some(1500.0 + day as f64),
        loser_rating: Some(1500.0 - day as f64),
        probability: Some(0.5),
        date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        draw: false,
    }
}
