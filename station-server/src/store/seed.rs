//! 系统初始化数据
//!
//! 首次启动时为缺失的集合文件写入默认用户、部门、示例任务和通知。
//! 已存在的文件不会被覆盖。

use anyhow::Context;
use chrono::{Duration, Utc};
use shared::{
    Department, Notification, NotificationKind, Role, Task, TaskStatus, User,
};

use crate::auth::password::hash_password;

use super::{Collection, JsonStore};

fn initial_users() -> anyhow::Result<Vec<User>> {
    let now = Utc::now();
    let hash = |pw: &str| hash_password(pw).map_err(|e| anyhow::anyhow!("password hash: {e}"));

    Ok(vec![
        User {
            id: 1,
            username: "admin".into(),
            password_hash: hash("admin123")?,
            name: "系统管理员".into(),
            role: Role::SuperAdmin,
            department: 1, // 信息中心
            email: "admin@example.com".into(),
            phone: "13800000000".into(),
            skills: vec!["全栈开发".into(), "系统管理".into(), "数据分析".into()],
            last_login: Some(now),
        },
        User {
            id: 2,
            username: "manager1".into(),
            password_hash: hash("123456")?,
            name: "张主任".into(),
            role: Role::DepartmentHead,
            department: 2, // 视频制作部
            email: "manager1@example.com".into(),
            phone: "13800000001".into(),
            skills: vec!["视频剪辑".into(), "导演".into(), "摄影".into()],
            last_login: Some(now),
        },
        User {
            id: 3,
            username: "user1".into(),
            password_hash: hash("123456")?,
            name: "李明".into(),
            role: Role::Member,
            department: 2, // 视频制作部
            email: "user1@example.com".into(),
            phone: "13800000002".into(),
            skills: vec!["视频剪辑".into(), "摄影".into()],
            last_login: Some(now),
        },
    ])
}

fn initial_departments() -> Vec<Department> {
    let dept = |id, name: &str, description: &str| Department {
        id,
        name: name.into(),
        description: description.into(),
    };
    vec![
        dept(1, "信息中心", "负责系统开发与维护"),
        dept(2, "视频制作部", "负责视频拍摄与制作"),
        dept(3, "新闻采编部", "负责新闻采集与编辑"),
        dept(4, "设计创意部", "负责平面设计与创意策划"),
        dept(5, "宣传运营部", "负责线上线下宣传与运营"),
    ]
}

fn initial_tasks() -> Vec<Task> {
    let now = Utc::now();
    vec![Task {
        id: 1,
        title: "校运会宣传视频制作".into(),
        description: "制作时长3分钟的校运会宣传片，突出体育精神与青春活力".into(),
        status: TaskStatus::InProgress,
        is_urgent: true,
        deadline: now + Duration::days(5),
        creator: 2, // manager1
        creator_name: "张主任".into(),
        department: 2, // 视频制作部
        department_name: "视频制作部".into(),
        members: vec![3], // user1
        attachments: vec![],
        created_at: now,
        started_at: Some(now),
        submitted_at: None,
        completed_at: None,
    }]
}

fn initial_notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: 1,
            content: "欢迎使用易班工作站管理系统".into(),
            time: now,
            kind: NotificationKind::Info,
            user_id: None, // 发给所有用户
        },
        Notification {
            id: 2,
            content: "您有一个新任务: 校运会宣传视频制作".into(),
            time: now,
            kind: NotificationKind::Warning,
            user_id: Some(3), // 发给user1
        },
    ]
}

/// 检查集合文件是否存在，不存在则写入初始数据
pub async fn ensure_seed_data(store: &JsonStore) -> anyhow::Result<()> {
    if !store.exists(Collection::Users).await {
        store
            .save(Collection::Users, &initial_users()?)
            .await
            .context("seeding users.json")?;
        tracing::info!("Seeded users.json with default accounts");
    }

    if !store.exists(Collection::Departments).await {
        store
            .save(Collection::Departments, &initial_departments())
            .await
            .context("seeding departments.json")?;
        tracing::info!("Seeded departments.json");
    }

    if !store.exists(Collection::Tasks).await {
        store
            .save(Collection::Tasks, &initial_tasks())
            .await
            .context("seeding tasks.json")?;
        tracing::info!("Seeded tasks.json");
    }

    if !store.exists(Collection::Notifications).await {
        store
            .save(Collection::Notifications, &initial_notifications())
            .await
            .context("seeding notifications.json")?;
        tracing::info!("Seeded notifications.json");
    }

    Ok(())
}
