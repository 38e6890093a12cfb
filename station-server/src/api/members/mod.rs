//! 成员搜索 API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Member search router (task assignment picker)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/members/search", get(handler::search))
}
