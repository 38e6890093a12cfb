//! 任务生命周期引擎
//!
//! 任务创建、状态流转、时间戳打点和按角色的可见性过滤。
//! 状态变更触发通知扇出 (参见 [`crate::notify`])。

pub mod lifecycle;

pub use lifecycle::TaskLifecycle;
