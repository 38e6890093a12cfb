//! 部门 API Handlers

use axum::{Json, extract::State};
use shared::Department;

use crate::core::ServerState;
use crate::store::Collection;
use crate::utils::AppResult;

/// List all departments
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Department>>> {
    let departments: Vec<Department> = state.get_store().load(Collection::Departments).await?;
    Ok(Json(departments))
}
