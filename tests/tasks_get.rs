//! `GET /tasks/{id}` — 단일 조회 통합 테스트

mod common;

use axum::http::StatusCode;
use common::{delete, get, post_json, tag_names, test_app};
use serde_json::json;

#[tokio::test]
async fn get_existing_task() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Test", "tags": ["work"] })).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = get(&app, &format!("/tasks/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["title"], "Test");
    assert_eq!(tag_names(&body), vec!["work"]);
}

#[tokio::test]
async fn get_nonexistent_task_returns_404() {
    let app = test_app().await;

    let (status, body) = get(&app, "/tasks/99999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["details"]["task"], "Task not found");
}

#[tokio::test]
async fn get_soft_deleted_task_returns_404() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Delete me" })).await;
    let id = created["id"].as_str().unwrap();

    delete(&app, &format!("/tasks/{id}")).await;
    let (status, body) = get(&app, &format!("/tasks/{id}")).await;

    // 삭제된 태스크와 처음부터 없던 태스크는 구분되지 않습니다.
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn health_check_responds_ok() {
    let app = test_app().await;

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
