use std::collections::HashMap;

use crate::domain::{Match, Player};
use crate::ranking::{Direction, sort_stable_by_key};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Diagonal: a player against themselves
    Own,
    /// Wins of the row player over the column player, draws counting half
    Score(f64),
}

impl Cell {
    pub fn score(&self) -> Option<f64> {
        match self {
            Cell::Own => None,
            Cell::Score(s) => Some(*s),
        }
    }
}

/// Square results matrix over the players who have played
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHead<'a> {
    pub players: Vec<&'a Player>,
    pub cells: Vec<Vec<Cell>>,
}

impl HeadToHead<'_> {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }
}

/// Build the head-to-head matrix.
///
/// Rows and columns are the active players that appear in at least one match,
/// ordered by name ignoring case. Matches against players outside that set
/// are left out.
pub fn head_to_head<'a>(matches: &[Match], players: &'a [Player]) -> HeadToHead<'a> {
    let mut listed: Vec<&Player> = players
        .iter()
        .filter(|p| p.active && matches.iter().any(|m| m.involves(&p.id)))
        .collect();
    sort_stable_by_key(&mut listed, Direction::Ascending, |p| p.name.to_lowercase());

    let index: HashMap<&str, usize> = listed
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();

    let size = listed.len();
    let mut scores = vec![vec![0.0; size]; size];

    for m in matches {
        let (Some(&winner), Some(&loser)) = (
            index.get(m.winner_id.as_str()),
            index.get(m.loser_id.as_str()),
        ) else {
            continue;
        };

        if m.draw {
            scores[winner][loser] += 0.5;
            scores[loser][winner] += 0.5;
        } else {
            scores[winner][loser] += 1.0;
        }
    }

    let cells = scores
        .into_iter()
        .enumerate()
        .map(|(row, line)| {
            line.into_iter()
                .enumerate()
                .map(|(col, score)| if row == col { Cell::Own } else { Cell::Score(score) })
                .collect()
        })
        .collect();

    HeadToHead {
        players: listed,
        cells,
    }
}
