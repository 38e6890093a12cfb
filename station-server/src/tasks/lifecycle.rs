//! Task Lifecycle Engine
//!
//! Invariants upheld here:
//! - ids are assigned max+1 per collection, 1 when empty
//! - status only moves one step forward through
//!   未开始 → 进行中 → 待验收 → 已完成, plus the explicit review
//!   rejection 待验收 → 进行中 and idempotent re-entry
//! - `started_at` / `submitted_at` / `completed_at` are stamped the first
//!   time the matching status is entered and never overwritten
//! - `members`, `department` and the name snapshots are fixed at creation

use std::sync::Arc;

use chrono::Utc;
use shared::{Department, Task, TaskCreate, TaskFilter, TaskStatus, User, next_id};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::notify::NotificationFanout;
use crate::store::{Collection, JsonStore};
use crate::utils::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct TaskLifecycle {
    store: Arc<JsonStore>,
}

impl TaskLifecycle {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Create a task.
    ///
    /// Restricted to admins and department heads. The department and all
    /// member ids must exist; creator and department names are snapshotted
    /// at creation time. Fans out one notification per assigned member
    /// after the task write. The two store operations are independent; a
    /// failed fan-out does not undo the created task.
    pub async fn create(&self, actor: &CurrentUser, draft: TaskCreate) -> AppResult<Task> {
        if !actor.can_manage_tasks() {
            return Err(AppError::forbidden("权限不足"));
        }

        draft
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        validate_required_text(&draft.title, "title", MAX_NAME_LEN)?;
        validate_required_text(&draft.description, "description", MAX_TEXT_LEN)?;

        let departments: Vec<Department> = self.store.load(Collection::Departments).await?;
        let department = departments
            .iter()
            .find(|d| d.id == draft.department)
            .ok_or_else(|| AppError::validation("部门不存在"))?;

        // Set semantics for members: dedupe, keep first-seen order
        let mut members: Vec<i64> = Vec::new();
        for member in &draft.members {
            if !members.contains(member) {
                members.push(*member);
            }
        }

        let users: Vec<User> = self.store.load(Collection::Users).await?;
        for member in &members {
            if !users.iter().any(|u| u.id == *member) {
                return Err(AppError::validation(format!("成员 {} 不存在", member)));
            }
        }

        let creator = actor.clone();
        let department_name = department.name.clone();
        let task = self
            .store
            .modify(Collection::Tasks, move |tasks: &mut Vec<Task>| {
                let task = Task {
                    id: next_id(tasks),
                    title: draft.title,
                    description: draft.description,
                    status: TaskStatus::NotStarted,
                    is_urgent: draft.is_urgent,
                    deadline: draft.deadline,
                    creator: creator.id,
                    creator_name: creator.name,
                    department: draft.department,
                    department_name,
                    members,
                    attachments: draft.attachments,
                    created_at: Utc::now(),
                    started_at: None,
                    submitted_at: None,
                    completed_at: None,
                };
                tasks.push(task.clone());
                Ok::<_, AppError>(task)
            })
            .await?;

        tracing::info!(
            task_id = task.id,
            creator = actor.id,
            department = task.department,
            members = task.members.len(),
            "Task created"
        );

        if let Err(e) = NotificationFanout::new(self.store.clone())
            .on_task_created(&task)
            .await
        {
            // The task write is already durable; surface the fan-out
            // failure without a compensating delete.
            tracing::error!(task_id = task.id, error = %e, "Notification fan-out failed after task creation");
            return Err(e);
        }

        Ok(task)
    }

    /// Apply a status transition and stamp the matching lifecycle
    /// timestamp on first entry.
    ///
    /// Fans out one notification to the task's creator per call, including
    /// idempotent re-entry of the current status.
    pub async fn transition_status(
        &self,
        actor: &CurrentUser,
        task_id: i64,
        target: TaskStatus,
    ) -> AppResult<Task> {
        let task = self
            .store
            .modify(Collection::Tasks, move |tasks: &mut Vec<Task>| {
                let task = tasks
                    .iter_mut()
                    .find(|t| t.id == task_id)
                    .ok_or_else(|| AppError::not_found("任务不存在"))?;

                if !task.status.can_transition_to(target) {
                    return Err(AppError::validation(format!(
                        "无效的状态变更: {} -> {}",
                        task.status, target
                    )));
                }

                task.status = target;
                let now = Utc::now();
                match target {
                    TaskStatus::InProgress if task.started_at.is_none() => {
                        task.started_at = Some(now);
                    }
                    TaskStatus::PendingReview if task.submitted_at.is_none() => {
                        task.submitted_at = Some(now);
                    }
                    TaskStatus::Completed if task.completed_at.is_none() => {
                        task.completed_at = Some(now);
                    }
                    _ => {}
                }

                Ok::<_, AppError>(task.clone())
            })
            .await?;

        tracing::info!(
            task_id,
            actor = actor.id,
            status = %task.status,
            "Task status updated"
        );

        if let Err(e) = NotificationFanout::new(self.store.clone())
            .on_status_changed(&task)
            .await
        {
            tracing::error!(task_id, error = %e, "Notification fan-out failed after status change");
            return Err(e);
        }

        Ok(task)
    }

    /// Role-visible tasks, optionally narrowed by status / department /
    /// urgency. Stable ascending-id order.
    pub async fn list_visible(
        &self,
        viewer: &CurrentUser,
        filter: &TaskFilter,
    ) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.store.load(Collection::Tasks).await?;

        tasks.retain(|task| {
            visible_to(viewer, task)
                && filter.status.is_none_or(|s| task.status == s)
                && filter.department.is_none_or(|d| task.department == d)
                && filter.urgent.is_none_or(|u| task.is_urgent == u)
        });
        tasks.sort_by_key(|t| t.id);

        Ok(tasks)
    }

    /// Task detail, visibility-checked.
    ///
    /// Tasks outside the viewer's scope report 不存在 rather than 无权限,
    /// so their existence is not leaked.
    pub async fn get(&self, viewer: &CurrentUser, task_id: i64) -> AppResult<Task> {
        let tasks: Vec<Task> = self.store.load(Collection::Tasks).await?;
        tasks
            .into_iter()
            .find(|t| t.id == task_id && visible_to(viewer, t))
            .ok_or_else(|| AppError::not_found("任务不存在"))
    }

    /// "我的任务": tasks the viewer is assigned to or created.
    pub async fn list_mine(&self, viewer: &CurrentUser) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.store.load(Collection::Tasks).await?;
        tasks.retain(|t| t.is_member(viewer.id) || t.creator == viewer.id);
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    /// 待办任务: not-yet-started tasks the viewer is assigned to.
    pub async fn list_todo(&self, viewer: &CurrentUser) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.store.load(Collection::Tasks).await?;
        tasks.retain(|t| t.status == TaskStatus::NotStarted && t.is_member(viewer.id));
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }
}

/// Role-based visibility rule:
/// - 超级管理员 / 管理员: every task
/// - 部门负责人: own department's tasks, plus tasks they are assigned to
/// - 普通成员: only tasks they are assigned to
pub fn visible_to(viewer: &CurrentUser, task: &Task) -> bool {
    use shared::Role;

    match viewer.role {
        Role::SuperAdmin | Role::Admin => true,
        Role::DepartmentHead => task.department == viewer.department || task.is_member(viewer.id),
        Role::Member => task.is_member(viewer.id),
    }
}
