//! Task Model (任务)
//!
//! A task moves through four ordered statuses:
//!
//! ```text
//! 未开始 → 进行中 → 待验收 → 已完成
//!            ↑         │
//!            └─────────┘  (验收退回)
//! ```
//!
//! The only backward move is the explicit review rejection
//! 待验收 → 进行中; re-entering the current status is a no-op on
//! lifecycle timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Record;

/// Task status, ordered. Wire labels are the Chinese strings stored in
/// `tasks.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "未开始")]
    NotStarted,
    #[serde(rename = "进行中")]
    InProgress,
    #[serde(rename = "待验收")]
    PendingReview,
    #[serde(rename = "已完成")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::PendingReview,
        TaskStatus::Completed,
    ];

    /// Wire label (Chinese, as stored)
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "未开始",
            TaskStatus::InProgress => "进行中",
            TaskStatus::PendingReview => "待验收",
            TaskStatus::Completed => "已完成",
        }
    }

    /// Position in the four-state sequence (0-based)
    pub fn order(&self) -> u8 {
        match self {
            TaskStatus::NotStarted => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::PendingReview => 2,
            TaskStatus::Completed => 3,
        }
    }

    /// Transition rule: one step forward, idempotent re-entry of the
    /// current status, or the review rejection 待验收 → 进行中.
    pub fn can_transition_to(self, target: TaskStatus) -> bool {
        if target == self {
            return true;
        }
        if self == TaskStatus::PendingReview && target == TaskStatus::InProgress {
            return true;
        }
        target.order() == self.order() + 1
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Task attachment metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    /// Size in bytes
    pub size: u64,
}

/// Task record as stored in `tasks.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub is_urgent: bool,
    pub deadline: DateTime<Utc>,
    /// Creator user id
    pub creator: i64,
    /// Creator name snapshot at creation time (not live-synced)
    pub creator_name: String,
    /// Department id, fixed at creation
    pub department: i64,
    /// Department name snapshot at creation time (not live-synced)
    pub department_name: String,
    /// Assigned member user ids; set semantics, order kept for display
    #[serde(default)]
    pub members: Vec<i64>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    /// Stamped the first time the task enters 进行中, never overwritten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Stamped the first time the task enters 待验收, never overwritten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Stamped the first time the task enters 已完成, never overwritten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_member(&self, user_id: i64) -> bool {
        self.members.contains(&user_id)
    }

    /// Overdue = past deadline and not completed
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline < now && self.status != TaskStatus::Completed
    }
}

impl Record for Task {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Create task payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub deadline: DateTime<Utc>,
    /// Department id, must reference an existing department
    pub department: i64,
    #[serde(default)]
    pub members: Vec<i64>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Optional task list filters, applied after role visibility
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub department: Option<i64>,
    pub urgent: Option<bool>,
}
