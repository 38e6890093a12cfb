//! HTTP API 集成测试
//!
//! 通过 `tower::ServiceExt::oneshot` 直接驱动完整路由栈，
//! 覆盖认证中间件、公开路由白名单和任务接口。

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use station_server::core::{Config, ServerState};
use station_server::{JwtService, api};
use tower::ServiceExt;

async fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    (dir, api::build_app(&state))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": username, "password": password})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_rejects_wrong_password_with_401() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "manager1", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "用户名或密码错误");

    // 不存在的用户名返回同样的错误
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "nobody", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "用户名或密码错误");
}

#[tokio::test]
async fn login_returns_token_and_public_user() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "manager1", "password": "123456"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["data"]["username"], "manager1");
    assert_eq!(body["data"]["role"], "部门负责人");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(&app, json_request("GET", "/api/tasks", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "未授权访问");

    let (status, _) = send(
        &app,
        json_request("GET", "/api/tasks", Some("not-a-jwt"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn departments_are_public() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(&app, json_request("GET", "/api/departments", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let departments = body.as_array().unwrap();
    assert_eq!(departments.len(), 5);
    assert_eq!(departments[0]["name"], "信息中心");
}

#[tokio::test]
async fn manager_creates_a_task_and_member_sees_it() {
    let (_dir, app) = test_app().await;
    let manager_token = login(&app, "manager1", "123456").await;

    let deadline = (chrono::Utc::now() + chrono::Duration::days(4)).to_rfc3339();
    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/tasks",
            Some(&manager_token),
            Some(json!({
                "title": "毕业季纪念视频",
                "description": "收集素材并剪辑成片",
                "deadline": deadline,
                "department": 2,
                "members": [3],
                "isUrgent": true
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 种子数据已有 1 个任务
    assert_eq!(created["id"], 2);
    assert_eq!(created["status"], "未开始");
    assert_eq!(created["departmentName"], "视频制作部");

    let member_token = login(&app, "user1", "123456").await;
    let (status, todo) = send(
        &app,
        json_request("GET", "/api/tasks/todo", Some(&member_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let todo = todo.as_array().unwrap();
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0]["title"], "毕业季纪念视频");

    // 新任务通知在成员的通知列表里
    let (status, rows) = send(
        &app,
        json_request("GET", "/api/notifications", Some(&member_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["content"].as_str().unwrap())
        .collect();
    assert!(contents.contains(&"您有一个新任务: 毕业季纪念视频"));
}

#[tokio::test]
async fn status_updates_flow_through_the_api() {
    let (_dir, app) = test_app().await;
    let member_token = login(&app, "user1", "123456").await;

    // 种子任务 1 (进行中) 由 user1 负责
    let (status, updated) = send(
        &app,
        json_request(
            "POST",
            "/api/tasks/1/status",
            Some(&member_token),
            Some(json!({"status": "待验收"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "待验收");
    assert!(updated["submittedAt"].is_string());

    // 跳过验收直接完成以外的非法迁移被拒绝
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/tasks/1/status",
            Some(&member_token),
            Some(json!({"status": "未开始"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("无效的状态变更"));
}

#[tokio::test]
async fn member_search_filters_by_department() {
    let (_dir, app) = test_app().await;
    let token = login(&app, "manager1", "123456").await;

    let (status, body) = send(
        &app,
        json_request("GET", "/api/members/search?department=2", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let members = body.as_array().unwrap();
    assert!(!members.is_empty());
    assert!(members.iter().all(|m| m["department"] == 2));

    let (status, body) = send(
        &app,
        // "李" percent 编码后的查询串
        json_request(
            "GET",
            "/api/members/search?query=%E6%9D%8E",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["name"], "李明");
}

#[tokio::test]
async fn statistics_respect_role_gates() {
    let (_dir, app) = test_app().await;

    let member_token = login(&app, "user1", "123456").await;
    let (status, _) = send(
        &app,
        json_request("GET", "/api/statistics/tasks", Some(&member_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = login(&app, "admin", "admin123").await;
    let (status, body) = send(
        &app,
        json_request("GET", "/api/statistics/tasks", Some(&admin_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalTasks"], 1);
    assert_eq!(body["statusStats"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn expired_tokens_read_as_401() {
    let (_dir, app) = test_app().await;

    // 用同一密钥签发一个已过期的令牌
    let service = JwtService::new();
    let mut config = service.config.clone();
    config.expiration_minutes = -5;
    let expired = JwtService::with_config(config)
        .generate_token(&shared::User {
            id: 3,
            username: "user1".into(),
            password_hash: String::new(),
            name: "李明".into(),
            role: shared::Role::Member,
            department: 2,
            email: "user1@example.com".into(),
            phone: String::new(),
            skills: vec![],
            last_login: None,
        })
        .unwrap();

    let (status, body) = send(
        &app,
        json_request("GET", "/api/tasks", Some(&expired), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "令牌已过期");
}
