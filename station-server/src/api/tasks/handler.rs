//! 任务 API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{Task, TaskCreate, TaskFilter, TaskStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::tasks::TaskLifecycle;
use crate::utils::AppResult;

/// Status update payload: `{"status": "进行中"}`
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// List tasks visible to the caller, with optional filters
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(filter): Query<TaskFilter>,
) -> AppResult<Json<Vec<Task>>> {
    let lifecycle = TaskLifecycle::new(state.get_store());
    let tasks = lifecycle.list_visible(&current, &filter).await?;
    Ok(Json(tasks))
}

/// Create a task (admins and department heads only)
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<TaskCreate>,
) -> AppResult<Json<Task>> {
    let lifecycle = TaskLifecycle::new(state.get_store());
    let task = lifecycle.create(&current, payload).await?;
    Ok(Json(task))
}

/// 待办任务: not-yet-started tasks assigned to the caller
pub async fn list_todo(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Task>>> {
    let lifecycle = TaskLifecycle::new(state.get_store());
    let tasks = lifecycle.list_todo(&current).await?;
    Ok(Json(tasks))
}

/// 我的任务: tasks the caller is assigned to or created
pub async fn list_mine(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Task>>> {
    let lifecycle = TaskLifecycle::new(state.get_store());
    let tasks = lifecycle.list_mine(&current).await?;
    Ok(Json(tasks))
}

/// Task detail, visibility-checked
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Task>> {
    let lifecycle = TaskLifecycle::new(state.get_store());
    let task = lifecycle.get(&current, id).await?;
    Ok(Json(task))
}

/// Apply a status transition
pub async fn update_status(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Task>> {
    let lifecycle = TaskLifecycle::new(state.get_store());
    let task = lifecycle.transition_status(&current, id, payload.status).await?;
    Ok(Json(task))
}
