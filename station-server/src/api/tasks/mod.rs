//! 任务 API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Task router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tasks", routes())
}

fn routes() -> Router<ServerState> {
    // 列表路由在 "/{id}" 之前注册，/todo 与 /mine 不会被当作 id
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/todo", get(handler::list_todo))
        .route("/mine", get(handler::list_mine))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", post(handler::update_status))
}
