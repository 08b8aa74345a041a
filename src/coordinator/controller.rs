use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use super::view_slot::{Applied, ViewSlot};
use crate::api::RankingsSource;
use crate::config::RankingSettings;
use crate::domain::{Batch, Match, Player};
use crate::matches::{self, HeadToHead, MatchRow, TrendPoint, TrendSummary};
use crate::ranking::{self, RankedPlayer};
use crate::submission::{self, Selection};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this match?";
pub const DELETE_PLAYER_PROMPT: &str =
    "Are you sure you want to delete this player and all of their matches?";

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

#[derive(Debug)]
pub struct ProfileSnapshot {
    pub player: Player,
    pub matches: Batch<Match>,
}

/// Everything the profile page shows, derived from one snapshot
#[derive(Debug)]
pub struct ProfileView<'a> {
    pub player: &'a Player,
    pub trend: Vec<TrendPoint>,
    pub summary: Option<TrendSummary>,
    pub rows: Vec<MatchRow<'a>>,
}

impl<'a> ProfileView<'a> {
    pub fn from_snapshot(snapshot: &'a ProfileSnapshot) -> Self {
        let trend = matches::trend(&snapshot.matches.items, &snapshot.player);
        let summary = matches::summarize(&trend);
        Self {
            player: &snapshot.player,
            trend,
            summary,
            rows: matches::present(&snapshot.matches.items, false),
        }
    }
}

/// Owns the latest snapshot of each view and re-derives the views from it.
///
/// Operations take `&mut self`, so one coordinator never has two writes in
/// flight.
pub struct Coordinator<S> {
    source: S,
    settings: RankingSettings,
    players: ViewSlot<Batch<Player>>,
    matches: ViewSlot<Batch<Match>>,
    profile: ViewSlot<ProfileSnapshot>,
}

impl<S: RankingsSource> Coordinator<S> {
    pub fn new(source: S, settings: RankingSettings) -> Self {
        Self {
            source,
            settings,
            players: ViewSlot::new("ranking"),
            matches: ViewSlot::new("match log"),
            profile: ViewSlot::new("profile"),
        }
    }

    // --- Refresh ---

    pub async fn refresh_players(&mut self) -> Applied {
        let ticket = self.players.begin_refresh();
        let result = self.source.fetch_players().await;
        self.players.apply(ticket, result)
    }

    pub async fn refresh_matches(&mut self) -> Applied {
        let ticket = self.matches.begin_refresh();
        let result = self.source.fetch_matches().await;
        self.matches.apply(ticket, result)
    }

    pub async fn refresh_profile(&mut self, player_id: &str) -> Applied {
        let ticket = self.profile.begin_refresh();
        let result = self.fetch_profile(player_id).await;
        self.profile.apply(ticket, result)
    }

    async fn fetch_profile(&self, player_id: &str) -> Result<ProfileSnapshot> {
        let player = self.source.fetch_player(player_id).await?;
        let matches = self.source.fetch_player_matches(player_id).await?;
        Ok(ProfileSnapshot { player, matches })
    }

    // --- Derived Views ---

    pub fn ranking(&self, now: DateTime<Utc>) -> Option<Vec<RankedPlayer<'_>>> {
        self.players
            .snapshot()
            .map(|batch| ranking::rank_with(&batch.items, now, &self.settings))
    }

    pub fn match_log(&self, delete_enabled: bool) -> Option<Vec<MatchRow<'_>>> {
        self.matches
            .snapshot()
            .map(|batch| matches::present(&batch.items, delete_enabled))
    }

    pub fn profile(&self) -> Option<ProfileView<'_>> {
        self.profile.snapshot().map(ProfileView::from_snapshot)
    }

    /// Needs both the players and the matches snapshot
    pub fn head_to_head(&self) -> Option<HeadToHead<'_>> {
        let players = self.players.snapshot()?;
        let played = self.matches.snapshot()?;
        Some(matches::head_to_head(&played.items, &players.items))
    }

    pub fn players_slot(&self) -> &ViewSlot<Batch<Player>> {
        &self.players
    }

    pub fn matches_slot(&self) -> &ViewSlot<Batch<Match>> {
        &self.matches
    }

    pub fn profile_slot(&self) -> &ViewSlot<ProfileSnapshot> {
        &self.profile
    }

    // --- Writes ---

    /// Validate, dispatch, then refresh players and matches. A rejected
    /// submission sends nothing and changes nothing.
    pub async fn submit_match(
        &mut self,
        winner: &Selection,
        loser: &Selection,
        draw: bool,
    ) -> Result<Match> {
        let submission = submission::validate(winner, loser)?.with_draw(draw);
        let created = self
            .source
            .submit_match(&submission)
            .await
            .context("Match submission was not accepted")?;

        self.refresh_players().await;
        self.refresh_matches().await;
        Ok(created)
    }

    pub async fn create_player(&mut self, name: &str) -> Result<Player> {
        let new_player = submission::validate_player_name(name)?;
        let created = self
            .source
            .create_player(&new_player)
            .await
            .context("Player creation was not accepted")?;

        self.refresh_players().await;
        Ok(created)
    }

    /// Rename a player and/or change their active flag. The service replaces
    /// the whole record, so unchanged fields come from a fresh fetch.
    pub async fn update_player(
        &mut self,
        player_id: &str,
        name: Option<&str>,
        active: Option<bool>,
    ) -> Result<Player> {
        if name.is_none() && active.is_none() {
            return Err(submission::Rejection::NoChanges.into());
        }

        let current = self
            .source
            .fetch_player(player_id)
            .await
            .with_context(|| format!("Failed to load player {}", player_id))?;
        let update = submission::validate_player_update(&current, name, active)?;
        let updated = self
            .source
            .update_player(&update)
            .await
            .context("Player update was not accepted")?;

        self.refresh_players().await;
        Ok(updated)
    }

    /// Delete a player and their matches after confirmation, then re-fetch
    /// players and matches.
    pub async fn delete_player(
        &mut self,
        player_id: &str,
        confirmation: &impl Confirm,
    ) -> Result<DeleteOutcome> {
        if !confirmation.confirm(DELETE_PLAYER_PROMPT) {
            info!("Deletion of player {} cancelled", player_id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.source
            .delete_player(player_id)
            .await
            .with_context(|| format!("Player {} was not deleted", player_id))?;

        self.refresh_players().await;
        self.refresh_matches().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Delete after confirmation, then always re-fetch the match log.
    pub async fn delete_match(
        &mut self,
        match_id: &str,
        confirmation: &impl Confirm,
    ) -> Result<DeleteOutcome> {
        if !confirmation.confirm(DELETE_PROMPT) {
            info!("Deletion of match {} cancelled", match_id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.source
            .delete_match(match_id)
            .await
            .with_context(|| format!("Match {} was not deleted", match_id))?;

        self.refresh_matches().await;
        Ok(DeleteOutcome::Deleted)
    }
}
