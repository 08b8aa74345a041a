use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

use super::ordering::{Direction, rating_key, sort_stable_by_key};
use crate::config::RankingSettings;
use crate::domain::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Active,
    Inactive,
    New,
}

impl Tier {
    pub fn as_str(&self) -> &str {
        match self {
            Tier::Active => "active",
            Tier::Inactive => "inactive",
            Tier::New => "new",
        }
    }
}

/// Position shown in the ranking table; New players are unranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRank {
    Ranked(usize),
    Unranked,
}

impl DisplayRank {
    pub fn number(&self) -> Option<usize> {
        match self {
            DisplayRank::Ranked(n) => Some(*n),
            DisplayRank::Unranked => None,
        }
    }
}

impl fmt::Display for DisplayRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayRank::Ranked(n) => write!(f, "{}", n),
            DisplayRank::Unranked => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer<'a> {
    pub rank: DisplayRank,
    pub tier: Tier,
    pub player: &'a Player,
}

pub fn classify(player: &Player, now: DateTime<Utc>, settings: &RankingSettings) -> Tier {
    if player.games_played() < settings.match_cutoff {
        return Tier::New;
    }

    let window = Duration::days(settings.activity_window_days);
    match player.last_match_date {
        Some(last) if now.signed_duration_since(last) <= window => Tier::Active,
        _ => Tier::Inactive,
    }
}

/// Rank players with the default thresholds.
pub fn rank(players: &[Player], now: DateTime<Utc>) -> Vec<RankedPlayer<'_>> {
    rank_with(players, now, &RankingSettings::default())
}

/// Active players first, then Inactive, then New. Rank numbers run across
/// Active and Inactive as one sequence.
pub fn rank_with<'a>(
    players: &'a [Player],
    now: DateTime<Utc>,
    settings: &RankingSettings,
) -> Vec<RankedPlayer<'a>> {
    let mut active = Vec::new();
    let mut inactive = Vec::new();
    let mut new = Vec::new();

    for player in players {
        match classify(player, now, settings) {
            Tier::Active => active.push(player),
            Tier::Inactive => inactive.push(player),
            Tier::New => new.push(player),
        }
    }

    sort_stable_by_key(&mut active, Direction::Descending, |p| rating_key(p.rating));
    sort_stable_by_key(&mut inactive, Direction::Descending, |p| rating_key(p.rating));
    sort_stable_by_key(&mut new, Direction::Ascending, |&p| p.name.as_str());

    let ranked_tiers = active
        .into_iter()
        .map(|p| (Tier::Active, p))
        .chain(inactive.into_iter().map(|p| (Tier::Inactive, p)));

    let mut ranking: Vec<RankedPlayer<'a>> = ranked_tiers
        .enumerate()
        .map(|(i, (tier, player))| RankedPlayer {
            rank: DisplayRank::Ranked(i + 1),
            tier,
            player,
        })
        .collect();

    ranking.extend(new.into_iter().map(|player| RankedPlayer {
        rank: DisplayRank::Unranked,
        tier: Tier::New,
        player,
    }));

    ranking
}
