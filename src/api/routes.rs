use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use log::info;
use std::sync::Arc;
use std::time::Instant;

use super::RankingsSource;
use crate::api::handlers::{
    AppState, create_player, delete_match, delete_player, get_head_to_head, get_matches,
    get_player_profile, get_rankings, submit_match, update_player,
};

pub fn create_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: RankingsSource + Send + Sync + 'static,
{
    Router::new()
        .route("/api/rankings", get(get_rankings::<S>))
        .route("/api/head-to-head", get(get_head_to_head::<S>))
        .route("/api/players", post(create_player::<S>))
        .route(
            "/api/players/:id",
            put(update_player::<S>).delete(delete_player::<S>),
        )
        .route("/api/players/:id/profile", get(get_player_profile::<S>))
        .route("/api/matches", get(get_matches::<S>).post(submit_match::<S>))
        .route("/api/matches/:id", delete(delete_match::<S>))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status(),
        started.elapsed().as_millis()
    );
    response
}
