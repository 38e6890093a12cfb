//! 成员搜索 API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::MemberSummary;

use crate::core::ServerState;
use crate::users::UserDirectory;
use crate::utils::AppResult;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive substring match on name or username
    pub query: Option<String>,
    pub department: Option<i64>,
}

/// Search users for task assignment
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<MemberSummary>>> {
    let directory = UserDirectory::new(state.get_store());
    let members = directory
        .search(params.query.as_deref(), params.department)
        .await?;
    Ok(Json(members))
}
