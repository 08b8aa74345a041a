use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use log::{error, warn};
use std::sync::Arc;

use super::RankingsSource;
use super::models::{
    CreatePlayerRequest, DeleteParams, HeadToHeadResponse, ListResponse, MatchEntry,
    MatchLogParams, PlayerSummary, ProfileResponse, RankingEntry, SubmitMatchRequest,
    UpdatePlayerRequest,
};
use crate::config::AppConfig;
use crate::coordinator::{ProfileSnapshot, ProfileView, SubmissionGate};
use crate::matches;
use crate::ranking;
use crate::submission::{self, Rejection, Selection};

pub struct AppState<S> {
    pub source: S,
    pub config: AppConfig,
    pub gate: SubmissionGate,
}

impl<S> AppState<S> {
    pub fn new(source: S, config: AppConfig) -> Self {
        Self {
            source,
            config,
            gate: SubmissionGate::new(),
        }
    }
}

type SharedState<S> = State<Arc<AppState<S>>>;

fn service_error(context: &str, e: anyhow::Error) -> Response {
    error!("{}: {:#}", context, e);
    (StatusCode::BAD_GATEWAY, format!("{}: {:#}", context, e)).into_response()
}

fn rejection(e: Rejection) -> Response {
    warn!("Rejected request: {}", e);
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
}

fn unconfirmed(what: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("Deleting a {} requires confirm=true", what),
    )
        .into_response()
}

pub async fn get_rankings<S: RankingsSource>(State(state): SharedState<S>) -> Response {
    let batch = match state.source.fetch_players().await {
        Ok(batch) => batch,
        Err(e) => return service_error("Failed to fetch players", e),
    };

    let ranking = ranking::rank_with(&batch.items, Utc::now(), &state.config.ranking);
    let items: Vec<RankingEntry> = ranking.iter().map(RankingEntry::from).collect();

    Json(ListResponse {
        total: items.len(),
        items,
        skipped: batch.skipped.len(),
    })
    .into_response()
}

pub async fn get_matches<S: RankingsSource>(
    State(state): SharedState<S>,
    Query(params): Query<MatchLogParams>,
) -> Response {
    let batch = match state.source.fetch_matches().await {
        Ok(batch) => batch,
        Err(e) => return service_error("Failed to fetch matches", e),
    };

    let rows = matches::present(&batch.items, params.delete);
    let items: Vec<MatchEntry> = rows.iter().map(MatchEntry::from).collect();

    Json(ListResponse {
        total: items.len(),
        items,
        skipped: batch.skipped.len(),
    })
    .into_response()
}

pub async fn get_head_to_head<S: RankingsSource>(State(state): SharedState<S>) -> Response {
    let players = match state.source.fetch_players().await {
        Ok(batch) => batch,
        Err(e) => return service_error("Failed to fetch players", e),
    };
    let played = match state.source.fetch_matches().await {
        Ok(batch) => batch,
        Err(e) => return service_error("Failed to fetch matches", e),
    };

    let matrix = matches::head_to_head(&played.items, &players.items);
    Json(HeadToHeadResponse::from(&matrix)).into_response()
}

pub async fn get_player_profile<S: RankingsSource>(
    State(state): SharedState<S>,
    Path(player_id): Path<String>,
) -> Response {
    let player = match state.source.fetch_player(&player_id).await {
        Ok(player) => player,
        Err(e) => return service_error(&format!("Failed to fetch player {}", player_id), e),
    };
    let player_matches = match state.source.fetch_player_matches(&player_id).await {
        Ok(batch) => batch,
        Err(e) => return service_error(&format!("Failed to fetch matches of {}", player_id), e),
    };

    let snapshot = ProfileSnapshot {
        player,
        matches: player_matches,
    };
    let view = ProfileView::from_snapshot(&snapshot);

    Json(ProfileResponse::from(&view)).into_response()
}

pub async fn create_player<S: RankingsSource>(
    State(state): SharedState<S>,
    Json(body): Json<CreatePlayerRequest>,
) -> Response {
    let new_player = match submission::validate_player_name(&body.name) {
        Ok(p) => p,
        Err(e) => return rejection(e),
    };

    match state.source.create_player(&new_player).await {
        Ok(player) => (StatusCode::CREATED, Json(PlayerSummary::from(&player))).into_response(),
        Err(e) => service_error("Player creation was not accepted", e),
    }
}

pub async fn update_player<S: RankingsSource>(
    State(state): SharedState<S>,
    Path(player_id): Path<String>,
    Json(body): Json<UpdatePlayerRequest>,
) -> Response {
    if body.name.is_none() && body.active.is_none() {
        return rejection(Rejection::NoChanges);
    }

    let current = match state.source.fetch_player(&player_id).await {
        Ok(player) => player,
        Err(e) => return service_error(&format!("Failed to fetch player {}", player_id), e),
    };
    let update = match submission::validate_player_update(&current, body.name.as_deref(), body.active) {
        Ok(update) => update,
        Err(e) => return rejection(e),
    };

    match state.source.update_player(&update).await {
        Ok(player) => Json(PlayerSummary::from(&player)).into_response(),
        Err(e) => service_error("Player update was not accepted", e),
    }
}

pub async fn delete_player<S: RankingsSource>(
    State(state): SharedState<S>,
    Path(player_id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Response {
    if !params.confirm {
        return unconfirmed("player");
    }

    match state.source.delete_player(&player_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_error(&format!("Player {} was not deleted", player_id), e),
    }
}

pub async fn submit_match<S: RankingsSource>(
    State(state): SharedState<S>,
    Json(body): Json<SubmitMatchRequest>,
) -> Response {
    let winner = Selection::from(body.winner.as_deref());
    let loser = Selection::from(body.loser.as_deref());

    let match_submission = match submission::validate(&winner, &loser) {
        Ok(s) => s.with_draw(body.draw),
        Err(e) => return rejection(e),
    };

    let Some(_permit) = state.gate.try_acquire(&match_submission) else {
        return (
            StatusCode::CONFLICT,
            "An identical match submission is already in progress",
        )
            .into_response();
    };

    match state.source.submit_match(&match_submission).await {
        Ok(created) => {
            let row = matches::MatchRow {
                record: &created,
                deletable: false,
            };
            (StatusCode::CREATED, Json(MatchEntry::from(&row))).into_response()
        }
        Err(e) => service_error("Match submission was not accepted", e),
    }
}

pub async fn delete_match<S: RankingsSource>(
    State(state): SharedState<S>,
    Path(match_id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Response {
    if !params.confirm {
        return unconfirmed("match");
    }

    match state.source.delete_match(&match_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_error(&format!("Match {} was not deleted", match_id), e),
    }
}
