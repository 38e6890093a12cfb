//! 统计 API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Statistics router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/statistics/tasks", get(handler::task_stats))
}
