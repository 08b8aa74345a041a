use serde::Serialize;
use thiserror::Error;

use crate::domain::{Player, PlayerId};

/// Value of an untouched player picker
pub const PLACEHOLDER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Unset,
    Player(PlayerId),
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER {
            Selection::Unset
        } else {
            Selection::Player(trimmed.to_string())
        }
    }
}

impl From<Option<&str>> for Selection {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Selection::from).unwrap_or(Selection::Unset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no winner selected")]
    MissingWinner,
    #[error("no loser selected")]
    MissingLoser,
    #[error("player {0} cannot play against themselves")]
    SelfMatch(PlayerId),
    #[error("player name cannot be empty")]
    EmptyName,
    #[error("nothing to change")]
    NoChanges,
}

/// Match ready to be sent to the rankings service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSubmission {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub draw: bool,
}

impl MatchSubmission {
    pub fn with_draw(mut self, draw: bool) -> Self {
        self.draw = draw;
        self
    }

    /// Request body in the service's `{result: [winner, loser], draw}` shape
    pub fn body(&self) -> SubmitMatchBody<'_> {
        SubmitMatchBody {
            result: [self.winner_id.as_str(), self.loser_id.as_str()],
            draw: self.draw,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitMatchBody<'a> {
    pub result: [&'a str; 2],
    pub draw: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPlayer {
    pub name: String,
}

/// Replacement player record in the service's `PUT /players` shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerUpdate {
    pub id: PlayerId,
    pub name: String,
    pub active: bool,
}

pub fn validate(winner: &Selection, loser: &Selection) -> Result<MatchSubmission, Rejection> {
    let winner_id = match winner {
        Selection::Player(id) => id,
        Selection::Unset => return Err(Rejection::MissingWinner),
    };
    let loser_id = match loser {
        Selection::Player(id) => id,
        Selection::Unset => return Err(Rejection::MissingLoser),
    };

    if winner_id == loser_id {
        return Err(Rejection::SelfMatch(winner_id.clone()));
    }

    Ok(MatchSubmission {
        winner_id: winner_id.clone(),
        loser_id: loser_id.clone(),
        draw: false,
    })
}

pub fn validate_player_name(raw: &str) -> Result<NewPlayer, Rejection> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Rejection::EmptyName);
    }
    Ok(NewPlayer {
        name: name.to_string(),
    })
}

/// Merge a rename and/or an active flag change into the player's current record.
pub fn validate_player_update(
    current: &Player,
    name: Option<&str>,
    active: Option<bool>,
) -> Result<PlayerUpdate, Rejection> {
    if name.is_none() && active.is_none() {
        return Err(Rejection::NoChanges);
    }

    let name = match name {
        Some(raw) => validate_player_name(raw)?.name,
        None => current.name.clone(),
    };

    Ok(PlayerUpdate {
        id: current.id.clone(),
        name,
        active: active.unwrap_or(current.active),
    })
}
