//! 통합 테스트 공용 하네스
//!
//! 실제 서버와 동일한 라우터(`haldo::app`)를 인메모리 SQLite 위에 구성하고,
//! 포트 바인딩 없이 tower의 `oneshot()`으로 요청을 하나씩 흘려보냅니다.
//! 각 테스트는 자기만의 데이터베이스를 가지므로 서로 간섭하지 않습니다.

// 테스트 바이너리마다 사용하는 헬퍼가 달라 dead_code 경고가 나므로 끕니다.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt; // .collect(): 응답 본문 스트림을 바이트로 수집
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt; // .oneshot(): Router에 요청 하나를 직접 전달

/// 마이그레이션이 적용된 인메모리 DB 위에 테스트용 앱을 만듭니다.
///
/// max_connections(1): 인메모리 SQLite는 연결마다 별개의 DB가 되므로
/// 풀이 두 번째 연결을 만들면 빈 DB를 보게 됩니다. 연결을 하나로 고정합니다.
pub async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    haldo::app(pool)
}

/// 요청을 보내고 (상태 코드, JSON 본문) 쌍을 돌려줍니다.
///
/// 본문이 비어 있으면(204 등) `Value::Null`을 반환합니다.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    // Router는 Clone이 저렴하므로 (내부 공유) 요청마다 복제해 씁니다.
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body was not valid JSON")
    };

    (status, json)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, uri, Some(body)).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, Method::GET, uri, None).await
}

pub async fn patch_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, Method::DELETE, uri, None).await
}

/// 오늘로부터 days일 뒤의 날짜를 "YYYY-MM-DD" 문자열로 만듭니다.
pub fn future_date(days: i64) -> String {
    (chrono::Local::now().date_naive() + chrono::Duration::days(days)).to_string()
}

/// 오늘로부터 days일 전의 날짜를 "YYYY-MM-DD" 문자열로 만듭니다.
pub fn past_date(days: i64) -> String {
    (chrono::Local::now().date_naive() - chrono::Duration::days(days)).to_string()
}

/// 응답 JSON의 태그 목록에서 이름만 뽑아 정렬된 Vec으로 돌려줍니다.
pub fn tag_names(task: &Value) -> Vec<String> {
    let mut names: Vec<String> = task["tags"]
        .as_array()
        .expect("tags should be an array")
        .iter()
        .map(|tag| tag["name"].as_str().expect("tag name").to_string())
        .collect();
    names.sort();
    names
}
