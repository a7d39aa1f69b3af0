//! `PATCH /tasks/{id}` — 부분 업데이트 통합 테스트

mod common;

use axum::http::StatusCode;
use common::{delete, future_date, past_date, patch_json, post_json, tag_names, test_app};
use serde_json::json;

#[tokio::test]
async fn patch_title_only_leaves_other_fields() {
    let app = test_app().await;
    let (_, created) =
        post_json(&app, "/tasks", json!({ "title": "Old title", "priority": 4 })).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = patch_json(&app, &format!("/tasks/{id}"), json!({ "title": "New title" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "New title");
    assert_eq!(body["priority"], 4); // 본문에 없던 필드는 그대로
}

#[tokio::test]
async fn patch_marks_completed() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task" })).await;
    let id = created["id"].as_str().unwrap();

    let (_, body) = patch_json(&app, &format!("/tasks/{id}"), json!({ "completed": true })).await;

    assert_eq!(body["completed"], true);
}

#[tokio::test]
async fn patch_priority() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task", "priority": 1 })).await;
    let id = created["id"].as_str().unwrap();

    let (_, body) = patch_json(&app, &format!("/tasks/{id}"), json!({ "priority": 5 })).await;

    assert_eq!(body["priority"], 5);
}

#[tokio::test]
async fn patch_description() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task" })).await;
    let id = created["id"].as_str().unwrap();

    let (_, body) = patch_json(
        &app,
        &format!("/tasks/{id}"),
        json!({ "description": "Now has a description" }),
    )
    .await;

    assert_eq!(body["description"], "Now has a description");
}

#[tokio::test]
async fn patch_due_date() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task" })).await;
    let id = created["id"].as_str().unwrap();
    let due = future_date(7);

    let (_, body) = patch_json(&app, &format!("/tasks/{id}"), json!({ "due_date": due })).await;

    assert_eq!(body["due_date"], due);
}

#[tokio::test]
async fn patch_tags_replaces_all() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task", "tags": ["old"] })).await;
    let id = created["id"].as_str().unwrap();

    let (_, body) = patch_json(
        &app,
        &format!("/tasks/{id}"),
        json!({ "tags": ["new1", "new2"] }),
    )
    .await;

    assert_eq!(tag_names(&body), vec!["new1", "new2"]);
}

#[tokio::test]
async fn patch_empty_tag_list_clears_associations() {
    let app = test_app().await;
    let (_, created) =
        post_json(&app, "/tasks", json!({ "title": "Task", "tags": ["a", "b"] })).await;
    let id = created["id"].as_str().unwrap();

    // 빈 배열은 "필드 없음"과 다릅니다: 연결을 전부 해제합니다.
    let (status, body) = patch_json(&app, &format!("/tasks/{id}"), json!({ "tags": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn patch_tags_reuses_existing_tag_rows() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task", "tags": ["keep"] })).await;
    let id = created["id"].as_str().unwrap();
    let original_tag_id = created["tags"][0]["id"].clone();

    let (_, body) = patch_json(
        &app,
        &format!("/tasks/{id}"),
        json!({ "tags": ["keep", "extra"] }),
    )
    .await;

    // 같은 이름은 새 행을 만들지 않고 기존 태그 행을 다시 연결합니다.
    let kept = body["tags"]
        .as_array()
        .unwrap()
        .iter()
        .find(|tag| tag["name"] == "keep")
        .expect("keep tag should remain");
    assert_eq!(kept["id"], original_tag_id);
}

#[tokio::test]
async fn patch_empty_body_changes_nothing() {
    let app = test_app().await;
    let (_, created) =
        post_json(&app, "/tasks", json!({ "title": "Immutable", "priority": 2, "tags": ["work"] }))
            .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = patch_json(&app, &format!("/tasks/{id}"), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Immutable");
    assert_eq!(body["priority"], 2);
    assert_eq!(body["completed"], false);
    assert_eq!(tag_names(&body), vec!["work"]);
}

#[tokio::test]
async fn patch_invalid_priority_is_rejected() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = patch_json(&app, &format!("/tasks/{id}"), json!({ "priority": 10 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation Failed");
    assert!(body["details"]["priority"].is_string());
}

#[tokio::test]
async fn patch_past_due_date_is_rejected() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = patch_json(
        &app,
        &format!("/tasks/{id}"),
        json!({ "due_date": past_date(1) }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_blank_title_is_rejected() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = patch_json(&app, &format!("/tasks/{id}"), json!({ "title": "  " })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_nonexistent_task_returns_404() {
    let app = test_app().await;

    let (status, body) = patch_json(&app, "/tasks/99999", json!({ "title": "Ghost" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn patch_soft_deleted_task_returns_404() {
    let app = test_app().await;
    let (_, created) = post_json(&app, "/tasks", json!({ "title": "Task" })).await;
    let id = created["id"].as_str().unwrap();

    delete(&app, &format!("/tasks/{id}")).await;
    let (status, _) = patch_json(&app, &format!("/tasks/{id}"), json!({ "title": "Back" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
