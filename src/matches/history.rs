use crate::domain::Match;
use crate::ranking::{Direction, sort_stable_by_key};

/// One row of the match log
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow<'a> {
    pub record: &'a Match,
    pub deletable: bool,
}

/// Most recent matches first. `delete_enabled` only marks rows for a delete
/// action, it never filters or reorders.
pub fn present(matches: &[Match], delete_enabled: bool) -> Vec<MatchRow<'_>> {
    let mut rows: Vec<MatchRow<'_>> = matches
        .iter()
        .map(|record| MatchRow {
            record,
            deletable: delete_enabled,
        })
        .collect();

    sort_stable_by_key(&mut rows, Direction::Descending, |row| row.record.date);
    rows
}
