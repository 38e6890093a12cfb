//! Shared types for the workstation backend
//!
//! Data models and request/response DTOs used by the server and its API
//! consumers. Wire format is camelCase with Chinese role and status
//! labels.

pub mod models;

// Re-exports
pub use models::{
    Attachment, Department, LoginRequest, LoginResponse, MemberSummary, Notification,
    NotificationKind, Record, Role, Task, TaskCreate, TaskFilter, TaskStatus, User, UserPublic,
    next_id,
};
pub use serde::{Deserialize, Serialize};
