pub mod head_to_head;
pub mod history;
pub mod trend;

pub use head_to_head::{Cell, HeadToHead, head_to_head};
pub use history::{MatchRow, present};
pub use trend::{TrendPoint, TrendSummary, summarize, trend};
