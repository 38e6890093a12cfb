//! Fan-out rules:
//!
//! - task created: one notification per assigned member, `warning` when
//!   the task is urgent, `info` otherwise
//! - status changed: one notification to the task's creator per
//!   transition call, `success` on 已完成, `info` otherwise
//!
//! All rows written by a single fan-out share one timestamp.

use std::sync::Arc;

use chrono::Utc;
use shared::{Notification, NotificationKind, Task, TaskStatus, next_id};

use crate::store::{Collection, JsonStore};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct NotificationFanout {
    store: Arc<JsonStore>,
}

impl NotificationFanout {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Notify every assigned member about a newly created task.
    ///
    /// A task with no members writes nothing and does not touch the
    /// collection file.
    pub async fn on_task_created(&self, task: &Task) -> AppResult<()> {
        if task.members.is_empty() {
            return Ok(());
        }

        let members = task.members.clone();
        let content = format!("您有一个新任务: {}", task.title);
        let kind = if task.is_urgent {
            NotificationKind::Warning
        } else {
            NotificationKind::Info
        };

        let written = self
            .store
            .modify(
                Collection::Notifications,
                move |rows: &mut Vec<Notification>| {
                    let now = Utc::now();
                    for member in members {
                        rows.push(Notification {
                            id: next_id(rows),
                            content: content.clone(),
                            time: now,
                            kind,
                            user_id: Some(member),
                        });
                    }
                    Ok::<_, AppError>(rows.len())
                },
            )
            .await?;

        tracing::info!(
            task_id = task.id,
            recipients = task.members.len(),
            total = written,
            "Task creation notifications written"
        );
        Ok(())
    }

    /// Notify the task's creator about a status change.
    pub async fn on_status_changed(&self, task: &Task) -> AppResult<()> {
        let content = format!("任务\"{}\"状态已更新为：{}", task.title, task.status);
        let kind = if task.status == TaskStatus::Completed {
            NotificationKind::Success
        } else {
            NotificationKind::Info
        };
        let creator = task.creator;

        self.store
            .modify(
                Collection::Notifications,
                move |rows: &mut Vec<Notification>| {
                    rows.push(Notification {
                        id: next_id(rows),
                        content,
                        time: Utc::now(),
                        kind,
                        user_id: Some(creator),
                    });
                    Ok::<_, AppError>(())
                },
            )
            .await
    }

    /// Write a broadcast row (`userId: null`), visible to every user.
    pub async fn broadcast(&self, content: String, kind: NotificationKind) -> AppResult<Notification> {
        self.store
            .modify(
                Collection::Notifications,
                move |rows: &mut Vec<Notification>| {
                    let row = Notification {
                        id: next_id(rows),
                        content,
                        time: Utc::now(),
                        kind,
                        user_id: None,
                    };
                    rows.push(row.clone());
                    Ok::<_, AppError>(row)
                },
            )
            .await
    }

    /// Personal rows plus broadcasts, newest first. Insertion order breaks
    /// timestamp ties (the sort is stable).
    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Notification>> {
        let mut rows: Vec<Notification> = self.store.load(Collection::Notifications).await?;
        rows.retain(|n| n.user_id.is_none() || n.user_id == Some(user_id));
        rows.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(rows)
    }
}
