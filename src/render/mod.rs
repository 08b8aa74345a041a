pub mod tables;

pub use tables::{
    format_date, format_probability, format_rating, head_to_head_table, match_table, profile_page,
    ranking_table, skipped_notice, trend_lines,
};
