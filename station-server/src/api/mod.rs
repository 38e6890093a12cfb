//! API 路由模块
//!
//! # 结构
//!
//! - [`auth`] - 登录与当前用户接口
//! - [`tasks`] - 任务管理接口
//! - [`notifications`] - 通知接口
//! - [`departments`] - 部门接口（公开）
//! - [`members`] - 成员搜索接口
//! - [`statistics`] - 任务统计接口

pub mod auth;
pub mod departments;
pub mod members;
pub mod notifications;
pub mod statistics;
pub mod tasks;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(auth::router())
        .merge(tasks::router())
        .merge(notifications::router())
        .merge(departments::router())
        .merge(members::router())
        .merge(statistics::router())
}

/// Assemble the full application: routes, auth middleware and the
/// tower-http layers.
pub fn build_app(state: &ServerState) -> Router {
    let x_request_id = http::HeaderName::from_static("x-request-id");

    build_router()
        // 使用 from_fn_with_state 以便中间件可以访问 ServerState
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}
