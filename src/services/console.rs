use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use log::info;
use std::io::{self, BufRead, Write};

use crate::api::{RankingsClient, RankingsSource};
use crate::config::AppConfig;
use crate::coordinator::{Applied, Confirm, Coordinator, DeleteOutcome, ViewSlot, ViewState};
use crate::domain::Batch;
use crate::errors::find_rejection;
use crate::render;
use crate::submission::Selection;

/// Answers every confirmation with yes (`--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Reads a y/N answer from standard input
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Terminal front end: one coordinator, text tables on stdout
pub struct ConsoleService<S> {
    coordinator: Coordinator<S>,
}

impl ConsoleService<RankingsClient> {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let source = RankingsClient::new(&config.service)?;
        info!("Using rankings service at {}", source.base_url());
        Ok(Self::with_source(source, config))
    }
}

impl<S: RankingsSource> ConsoleService<S> {
    pub fn with_source(source: S, config: &AppConfig) -> Self {
        Self {
            coordinator: Coordinator::new(source, config.ranking.clone()),
        }
    }

    pub async fn show_rankings(&mut self) -> Result<String> {
        let applied = self.coordinator.refresh_players().await;
        ensure_loaded(applied, self.coordinator.players_slot())?;

        let mut output = String::new();
        if let Some(ranking) = self.coordinator.ranking(Utc::now()) {
            output.push_str(&render::ranking_table(&ranking));
        }
        push_skipped(&mut output, "player", self.coordinator.players_slot());
        Ok(output)
    }

    pub async fn show_matches(&mut self, delete_enabled: bool) -> Result<String> {
        let applied = self.coordinator.refresh_matches().await;
        ensure_loaded(applied, self.coordinator.matches_slot())?;

        let mut output = String::new();
        if let Some(rows) = self.coordinator.match_log(delete_enabled) {
            output.push_str(&render::match_table(&rows));
        }
        push_skipped(&mut output, "match", self.coordinator.matches_slot());
        Ok(output)
    }

    pub async fn show_profile(&mut self, player_id: &str) -> Result<String> {
        let applied = self.coordinator.refresh_profile(player_id).await;
        ensure_loaded(applied, self.coordinator.profile_slot())?;

        let mut output = String::new();
        if let Some(view) = self.coordinator.profile() {
            output.push_str(&render::profile_page(&view));
        }
        if let Some(snapshot) = self.coordinator.profile_slot().snapshot() {
            if let Some(notice) = render::skipped_notice("match", snapshot.matches.skipped.len()) {
                output.push_str(&format!("{}\n", notice));
            }
        }
        Ok(output)
    }

    pub async fn add_player(&mut self, name: &str) -> Result<String> {
        let created = explain_rejection(self.coordinator.create_player(name).await)?;
        let mut output = format!("Added {} ({})\n\n", created.name.bold(), created.id);
        if let Some(ranking) = self.coordinator.ranking(Utc::now()) {
            output.push_str(&render::ranking_table(&ranking));
        }
        push_refresh_notice(&mut output, self.coordinator.players_slot());
        Ok(output)
    }

    pub async fn edit_player(
        &mut self,
        player_id: &str,
        name: Option<&str>,
        active: Option<bool>,
    ) -> Result<String> {
        let updated = explain_rejection(self.coordinator.update_player(player_id, name, active).await)?;
        let status = if updated.active { "active" } else { "retired" };
        let mut output = format!("Updated {} ({}), {}\n\n", updated.name.bold(), updated.id, status);
        if let Some(ranking) = self.coordinator.ranking(Utc::now()) {
            output.push_str(&render::ranking_table(&ranking));
        }
        push_refresh_notice(&mut output, self.coordinator.players_slot());
        Ok(output)
    }

    pub async fn remove_player(&mut self, player_id: &str, confirmation: &impl Confirm) -> Result<String> {
        match self.coordinator.delete_player(player_id, confirmation).await? {
            DeleteOutcome::Cancelled => Ok("Deletion cancelled, nothing was sent.\n".to_string()),
            DeleteOutcome::Deleted => {
                let mut output = format!("Deleted player {} and their matches\n\n", player_id);
                if let Some(ranking) = self.coordinator.ranking(Utc::now()) {
                    output.push_str(&render::ranking_table(&ranking));
                }
                push_refresh_notice(&mut output, self.coordinator.players_slot());
                push_refresh_notice(&mut output, self.coordinator.matches_slot());
                Ok(output)
            }
        }
    }

    pub async fn show_head_to_head(&mut self) -> Result<String> {
        let applied = self.coordinator.refresh_players().await;
        ensure_loaded(applied, self.coordinator.players_slot())?;
        let applied = self.coordinator.refresh_matches().await;
        ensure_loaded(applied, self.coordinator.matches_slot())?;

        let mut output = String::new();
        if let Some(matrix) = self.coordinator.head_to_head() {
            output.push_str(&render::head_to_head_table(&matrix));
        }
        push_skipped(&mut output, "match", self.coordinator.matches_slot());
        Ok(output)
    }

    pub async fn submit(&mut self, winner: &str, loser: &str, draw: bool) -> Result<String> {
        let winner = Selection::from(winner);
        let loser = Selection::from(loser);
        let created = explain_rejection(self.coordinator.submit_match(&winner, &loser, draw).await)?;

        let mut output = format!(
            "Recorded match {}: {} vs {}\n\n",
            created.id,
            created.winner_label(),
            created.loser_label()
        );
        if let Some(ranking) = self.coordinator.ranking(Utc::now()) {
            output.push_str(&render::ranking_table(&ranking));
        }
        push_refresh_notice(&mut output, self.coordinator.players_slot());
        push_refresh_notice(&mut output, self.coordinator.matches_slot());
        Ok(output)
    }

    pub async fn delete(&mut self, match_id: &str, confirmation: &impl Confirm) -> Result<String> {
        match self.coordinator.delete_match(match_id, confirmation).await? {
            DeleteOutcome::Cancelled => Ok("Deletion cancelled, nothing was sent.\n".to_string()),
            DeleteOutcome::Deleted => {
                let mut output = format!("Deleted match {}\n\n", match_id);
                if let Some(rows) = self.coordinator.match_log(true) {
                    output.push_str(&render::match_table(&rows));
                }
                push_refresh_notice(&mut output, self.coordinator.matches_slot());
                Ok(output)
            }
        }
    }
}

fn ensure_loaded<T>(applied: Applied, slot: &ViewSlot<T>) -> Result<()> {
    match applied {
        Applied::Failed => {
            let notice = slot.notice().unwrap_or("refresh failed").to_string();
            Err(anyhow::anyhow!(notice))
        }
        Applied::Fresh | Applied::Stale => Ok(()),
    }
}

fn push_skipped<T>(output: &mut String, kind: &str, slot: &ViewSlot<Batch<T>>) {
    let skipped = slot.snapshot().map(|b| b.skipped.len()).unwrap_or(0);
    if let Some(notice) = render::skipped_notice(kind, skipped) {
        output.push_str(&format!("{}\n", notice));
    }
}

/// A write went through but the follow-up refresh did not
fn push_refresh_notice<T>(output: &mut String, slot: &ViewSlot<T>) {
    if slot.state() != ViewState::Error {
        return;
    }
    if let Some(notice) = slot.notice() {
        output.push_str(&format!("{}\n", notice.yellow()));
    }
}

fn explain_rejection<T>(result: Result<T>) -> Result<T> {
    result.map_err(|e| {
        let explained = find_rejection(&e).map(|rejection| anyhow::anyhow!("Not sent: {}", rejection));
        explained.unwrap_or(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::testing::{FakeSource, game, person};

    fn console(source: FakeSource) -> ConsoleService<FakeSource> {
        ConsoleService::with_source(source, &AppConfig::default())
    }

    #[test]
    fn test_yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn test_rejections_are_explained() {
        let result: Result<()> = Err(anyhow::Error::new(crate::submission::Rejection::MissingWinner));
        let message = format!("{:#}", explain_rejection(result).unwrap_err());
        assert!(message.contains("Not sent: no winner selected"));
    }

    #[tokio::test]
    async fn test_add_player_reports_failed_refresh() {
        let source = FakeSource::default();
        source.set(|s| s.fail_reads = true);
        let mut service = console(source);

        let output = service.add_player("Dana").await.unwrap();

        assert!(output.contains("Added"));
        assert!(output.contains("Could not refresh ranking"));
        assert!(output.contains("service unavailable"));
    }

    #[tokio::test]
    async fn test_delete_reports_failed_refresh() {
        let source = FakeSource::with(vec![], vec![game("m1", "1", "2", 1)]);
        source.set(|s| s.fail_reads = true);
        let mut service = console(source);

        let output = service.delete("m1", &AssumeYes).await.unwrap();

        assert!(output.contains("Deleted match m1"));
        assert!(output.contains("Could not refresh match log"));
    }

    #[tokio::test]
    async fn test_successful_write_has_no_notice() {
        let source = FakeSource::with(
            vec![person("3", "Cid", 1500.0, 3, 0), person("4", "Dee", 1500.0, 3, 0)],
            vec![],
        );
        let mut service = console(source);

        let output = service.submit("3", "4", false).await.unwrap();

        assert!(output.contains("Recorded match m1"));
        assert!(output.contains("Cid"));
        assert!(!output.contains("Could not refresh"));
    }

    #[tokio::test]
    async fn test_show_rankings_fails_without_snapshot() {
        let source = FakeSource::default();
        source.set(|s| s.fail_reads = true);
        let mut service = console(source);

        let error = service.show_rankings().await.unwrap_err();
        assert!(error.to_string().contains("service unavailable"));
    }

    #[tokio::test]
    async fn test_head_to_head_and_player_management() {
        let source = FakeSource::with(
            vec![person("3", "Cid", 1500.0, 3, 0), person("4", "Dee", 1500.0, 3, 0)],
            vec![game("m1", "3", "4", 1)],
        );
        let mut service = console(source);

        let matrix = service.show_head_to_head().await.unwrap();
        assert!(matrix.contains("Cid"));
        assert!(matrix.lines().any(|l| l.ends_with("X")));

        let edited = service.edit_player("4", Some("Dee Dee"), Some(false)).await.unwrap();
        assert!(edited.contains("retired"));

        let refused = service.edit_player("4", None, None).await.unwrap_err();
        assert_eq!(refused.to_string(), "Not sent: nothing to change");

        let removed = service.remove_player("3", &AssumeYes).await.unwrap();
        assert!(removed.contains("Deleted player 3"));
        assert!(!removed.contains("Cid"));
    }
}
