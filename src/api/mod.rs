pub mod handlers;
pub mod models;
mod rankings_client;
pub mod routes;
mod source;

pub use rankings_client::RankingsClient;
pub use source::RankingsSource;
