//! Statistics Aggregator (任务统计)
//!
//! Read-only aggregation over the task collection. Admins aggregate over
//! every task; a department head aggregates only over their department.
//! Percentages are rounded to one decimal place; an empty scope reports
//! zero rates rather than dividing by zero.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{Department, Role, Task, TaskStatus};

use crate::auth::CurrentUser;
use crate::store::{Collection, JsonStore};
use crate::utils::{AppError, AppResult};

/// Task statistics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Percentage, one decimal place
    pub completion_rate: f64,
    /// Percentage of overdue-and-unfinished tasks, one decimal place
    pub overdue_rate: f64,
    pub department_stats: Vec<DepartmentStat>,
    pub status_stats: Vec<StatusCount>,
}

/// Per-department slice of the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStat {
    pub id: i64,
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

/// One row per status, in lifecycle order, zero-count rows included
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: usize,
}

#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<JsonStore>,
}

impl StatsAggregator {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Aggregate the viewer's task scope into a snapshot.
    pub async fn task_snapshot(&self, viewer: &CurrentUser) -> AppResult<StatsSnapshot> {
        if !viewer.can_view_statistics() {
            return Err(AppError::forbidden("权限不足"));
        }

        let mut tasks: Vec<Task> = self.store.load(Collection::Tasks).await?;
        if viewer.role == Role::DepartmentHead {
            tasks.retain(|t| t.department == viewer.department);
        }
        let departments: Vec<Department> = self.store.load(Collection::Departments).await?;

        Ok(snapshot(&tasks, &departments))
    }
}

fn snapshot(tasks: &[Task], departments: &[Department]) -> StatsSnapshot {
    let now = Utc::now();
    let total_tasks = tasks.len();
    let completed_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();

    // One row per department, zero-count rows included
    let department_stats = departments
        .iter()
        .map(|dept| {
            let total = tasks.iter().filter(|t| t.department == dept.id).count();
            let completed = tasks
                .iter()
                .filter(|t| t.department == dept.id && t.status == TaskStatus::Completed)
                .count();
            DepartmentStat {
                id: dept.id,
                name: dept.name.clone(),
                total,
                completed,
                completion_rate: rate(completed, total),
            }
        })
        .collect();

    let status_stats = TaskStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: tasks.iter().filter(|t| t.status == status).count(),
        })
        .collect();

    StatsSnapshot {
        total_tasks,
        completed_tasks,
        completion_rate: rate(completed_tasks, total_tasks),
        overdue_rate: rate(overdue, total_tasks),
        department_stats,
        status_stats,
    }
}

/// Percentage rounded to one decimal. 0.0 when the denominator is zero.
fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let pct = numerator as f64 / denominator as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}
