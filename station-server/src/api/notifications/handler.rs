//! 通知 API Handlers

use axum::{Json, extract::State};
use shared::Notification;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::notify::NotificationFanout;
use crate::utils::AppResult;

/// Caller's notifications (personal rows plus broadcasts), newest first
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let fanout = NotificationFanout::new(state.get_store());
    let rows = fanout.list_for_user(current.id).await?;
    Ok(Json(rows))
}
