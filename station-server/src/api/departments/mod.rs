//! 部门 API 模块
//!
//! 登录页的部门下拉框需要此接口，因此它在认证中间件的白名单内。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Department router (public)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/departments", get(handler::list))
}
