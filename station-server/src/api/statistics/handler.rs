//! 统计 API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::stats::{StatsAggregator, StatsSnapshot};
use crate::utils::AppResult;

/// Task statistics snapshot for the caller's scope
pub async fn task_stats(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<StatsSnapshot>> {
    let stats = StatsAggregator::new(state.get_store());
    let snapshot = stats.task_snapshot(&current).await?;
    Ok(Json(snapshot))
}
