pub mod dates;
pub mod models;
pub mod records;

pub use models::*;
pub use records::{Batch, SkippedRecord, decode_match, decode_matches, decode_player, decode_players};

use thiserror::Error;

/// Why a service record could not be mapped into a domain value
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing or empty field `{0}`")]
    MissingField(&'static str),
    #[error("unparseable timestamp `{0}`")]
    InvalidTimestamp(String),
    #[error("winner and loser are the same player ({0})")]
    SelfMatch(String),
    #[error("expected a list of {0} records")]
    NotAList(String),
    #[error("malformed record: {0}")]
    Shape(#[source] serde_json::Error),
}
