use log::warn;
use serde::Deserialize;
use serde_json::Value;

use super::dates::{parse_optional_timestamp, parse_timestamp};
use super::models::{Match, Player};
use super::RecordError;

// --- Wire Structures ---

/// Identifier as sent by the service: either a string or a bare number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    fn into_key(self) -> Option<String> {
        match self {
            RecordId::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RecordId::Number(n) => Some(n.to_string()),
        }
    }
}

/// Raw player record from the rankings service
#[derive(Debug, Deserialize)]
pub struct PlayerRecord {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub last_match_date: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Raw match record from the rankings service
#[derive(Debug, Deserialize)]
pub struct MatchRecord {
    pub id: Option<RecordId>,
    #[serde(default)]
    pub result: Option<Vec<RecordId>>,
    #[serde(default)]
    pub winner_id: Option<RecordId>,
    #[serde(default)]
    pub loser_id: Option<RecordId>,
    #[serde(default)]
    pub winner_name: Option<String>,
    #[serde(default)]
    pub loser_name: Option<String>,
    #[serde(default)]
    pub winner_rating: Option<f64>,
    #[serde(default)]
    pub loser_rating: Option<f64>,
    #[serde(default)]
    pub probability: Option<f64>,
    pub date: Option<String>,
    #[serde(default)]
    pub draw: bool,
}

impl TryFrom<PlayerRecord> for Player {
    type Error = RecordError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .and_then(RecordId::into_key)
            .ok_or(RecordError::MissingField("id"))?;
        let name = record
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(RecordError::MissingField("name"))?;
        let last_match_date = parse_optional_timestamp(record.last_match_date.as_deref())?;

        Ok(Player {
            id,
            name,
            wins: record.wins,
            losses: record.losses,
            draws: record.draws,
            rating: record.rating,
            last_match_date,
            active: record.active,
        })
    }
}

impl TryFrom<MatchRecord> for Match {
    type Error = RecordError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .and_then(RecordId::into_key)
            .ok_or(RecordError::MissingField("id"))?;

        let mut result = record.result.unwrap_or_default().into_iter();
        let from_result_winner = result.next();
        let from_result_loser = result.next();

        let winner_id = record
            .winner_id
            .or(from_result_winner)
            .and_then(RecordId::into_key)
            .ok_or(RecordError::MissingField("winner_id"))?;
        let loser_id = record
            .loser_id
            .or(from_result_loser)
            .and_then(RecordId::into_key)
            .ok_or(RecordError::MissingField("loser_id"))?;

        if winner_id == loser_id {
            return Err(RecordError::SelfMatch(winner_id));
        }

        let raw_date = record.date.ok_or(RecordError::MissingField("date"))?;
        let date = parse_timestamp(&raw_date)?;

        Ok(Match {
            id,
            winner_id,
            winner_name: record.winner_name,
            loser_id,
            loser_name: record.loser_name,
            winner_rating: record.winner_rating,
            loser_rating: record.loser_rating,
            probability: record.probability.filter(|p| (0.0..=1.0).contains(p)),
            date,
            draw: record.draw,
        })
    }
}

// --- Batch Decoding ---

/// Record dropped during boundary mapping
#[derive(Debug)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: RecordError,
}

/// Records that survived boundary mapping, plus the ones that did not
#[derive(Debug)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Batch<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            skipped: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Decode a single record.
pub fn decode_one<R, T>(value: Value) -> Result<T, RecordError>
where
    R: for<'de> Deserialize<'de>,
    T: TryFrom<R, Error = RecordError>,
{
    let record: R = serde_json::from_value(value).map_err(RecordError::Shape)?;
    T::try_from(record)
}

/// Decode a list response. A non-array payload is an error; individual
/// records that fail mapping are skipped and reported.
pub fn decode_batch<R, T>(value: Value, kind: &str) -> Result<Batch<T>, RecordError>
where
    R: for<'de> Deserialize<'de>,
    T: TryFrom<R, Error = RecordError>,
{
    let Value::Array(values) = value else {
        return Err(RecordError::NotAList(kind.to_string()));
    };

    let mut items = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        match decode_one::<R, T>(value) {
            Ok(item) => items.push(item),
            Err(reason) => {
                warn!("Skipping {} record #{}: {}", kind, index, reason);
                skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    Ok(Batch { items, skipped })
}

pub fn decode_players(value: Value) -> Result<Batch<Player>, RecordError> {
    decode_batch::<PlayerRecord, Player>(value, "player")
}

pub fn decode_matches(value: Value) -> Result<Batch<Match>, RecordError> {
    decode_batch::<MatchRecord, Match>(value, "match")
}

pub fn decode_player(value: Value) -> Result<Player, RecordError> {
    decode_one::<PlayerRecord, Player>(value)
}

pub fn decode_match(value: Value) -> Result<Match, RecordError> {
    decode_one::<MatchRecord, Match>(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_with_numeric_id_and_defaults() {
        let player = decode_player(json!({"id": 7, "name": " Ann ", "rating": 1000.0})).unwrap();

        assert_eq!(player.id, "7");
        assert_eq!(player.name, "Ann");
        assert_eq!((player.wins, player.losses, player.draws), (0, 0, 0));
        assert_eq!(player.last_match_date, None);
        assert!(player.active);
    }

    #[test]
    fn test_player_active_flag() {
        let retired = decode_player(json!({"id": "a", "name": "Ann", "active": false})).unwrap();
        assert!(!retired.active);
    }

    #[test]
    fn test_huge_counters_decode_and_rank() {
        let player = decode_player(json!({
            "id": 1,
            "name": "A",
            "wins": 4294967295u32,
            "losses": 1,
            "last_match_date": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(player.games_played(), u32::MAX);

        let now = parse_timestamp("2024-01-02").unwrap();
        let players = [player];
        let ranking = crate::ranking::rank(&players, now);
        assert_eq!(ranking[0].tier, crate::ranking::Tier::Active);
    }

    #[test]
    fn test_player_without_rating_is_kept() {
        let player = decode_player(json!({"id": "a", "name": "Ann"})).unwrap();
        assert_eq!(player.rating, None);
    }

    #[test]
    fn test_player_missing_name_fails() {
        let err = decode_player(json!({"id": "a", "name": "  "})).unwrap_err();
        assert!(matches!(err, RecordError::MissingField("name")));
    }

    #[test]
    fn test_player_bad_date_fails() {
        let err = decode_player(json!({
            "id": "a",
            "name": "Ann",
            "last_match_date": "not a date"
        }))
        .unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_match_from_result_pair() {
        let m = decode_match(json!({
            "id": "m1",
            "result": ["p1", "p2"],
            "draw": false,
            "date": "2024-01-02T10:00:00",
            "winner_rating": 1500.0,
            "loser_rating": 1490.0,
            "probability": 0.6
        }))
        .unwrap();

        assert_eq!(m.winner_id, "p1");
        assert_eq!(m.loser_id, "p2");
        assert_eq!(m.winner_name, None);
        assert_eq!(m.probability, Some(0.6));
    }

    #[test]
    fn test_explicit_participants_take_precedence() {
        let m = decode_match(json!({
            "id": 1,
            "result": ["x", "y"],
            "winner_id": 1,
            "loser_id": 2,
            "date": "2024-01-02"
        }))
        .unwrap();

        assert_eq!(m.winner_id, "1");
        assert_eq!(m.loser_id, "2");
    }

    #[test]
    fn test_self_match_is_rejected() {
        let err = decode_match(json!({
            "id": 1,
            "winner_id": 3,
            "loser_id": 3,
            "date": "2024-01-02"
        }))
        .unwrap_err();
        assert!(matches!(err, RecordError::SelfMatch(id) if id == "3"));
    }

    #[test]
    fn test_out_of_range_probability_is_dropped() {
        let m = decode_match(json!({
            "id": 1,
            "winner_id": 1,
            "loser_id": 2,
            "probability": 1.7,
            "date": "2024-01-02"
        }))
        .unwrap();
        assert_eq!(m.probability, None);
    }

    #[test]
    fn test_batch_skips_bad_records() {
        let batch = decode_players(json!([
            {"id": 1, "name": "Ann"},
            {"name": "No Id"},
            {"id": 3, "name": "Cid", "wins": -1},
            {"id": 4, "name": "Dee"}
        ]))
        .unwrap();

        let ids: Vec<&str> = batch.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(batch.skipped.len(), 2);
        assert_eq!(batch.skipped[0].index, 1);
        assert!(matches!(batch.skipped[1].reason, RecordError::Shape(_)));
        assert!(!batch.is_clean());
    }

    #[test]
    fn test_non_array_is_an_error() {
        let err = decode_matches(json!({"detail": "oops"})).unwrap_err();
        assert!(matches!(err, RecordError::NotAList(_)));
    }
}
