//! Notification Model (通知)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// Notification severity / display kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Error,
}

/// Notification record as stored in `notifications.json`.
///
/// Immutable once created; produced only by the fan-out engine (and seed
/// data). `user_id == None` is a broadcast visible to every user and is
/// serialized as an explicit `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub content: String,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub user_id: Option<i64>,
}

impl Record for Notification {
    fn id(&self) -> i64 {
        self.id
    }
}
