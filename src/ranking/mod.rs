pub mod ordering;
pub mod tiers;

pub use ordering::{Direction, rating_key, sort_stable_by_key};
pub use tiers::{DisplayRank, RankedPlayer, Tier, classify, rank, rank_with};
