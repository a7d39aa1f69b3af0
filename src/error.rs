//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! ## 응답 형식
//! 모든 에러는 `{ "error": <분류>, "details": { <필드/리소스>: <메시지> } }`
//! 형태의 JSON으로 변환됩니다:
//! - 검증 실패 → 422 `"Validation Failed"` + 필드별 메시지 맵
//! - 리소스 없음 → 404 `"Not Found"` + `{ "task": "Task not found" }`
//! - 그 외(DB 등) → 500, 내부 내용은 로그에만 기록

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (404, 422, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use std::collections::BTreeMap;
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 에러 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 입력 검증 실패 (HTTP 422)
    ///
    /// 필드 이름 → 에러 메시지 맵을 담습니다.
    /// BTreeMap을 사용하면 JSON 직렬화 시 필드 순서가 항상 일정합니다.
    #[error("Validation Failed")]
    Validation(BTreeMap<String, String>),

    /// 요청한 태스크를 찾을 수 없음 (HTTP 404)
    ///
    /// 존재하지 않는 ID와 소프트 삭제된 태스크 모두 이 에러가 됩니다.
    /// 호출자 입장에서 두 경우는 구분되지 않습니다.
    #[error("Task not found")]
    NotFound,

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error를 AppError로 자동 변환하는 From 트레이트를 구현합니다.
    /// 이를 통해 sqlx 함수에서 반환된 에러에 `?` 연산자를 사용하면
    /// 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

// impl IntoResponse for AppError:
// Axum의 IntoResponse 트레이트를 AppError에 구현합니다.
// 이를 통해 핸들러가 Err(AppError)를 반환하면,
// Axum이 자동으로 이 메서드를 호출하여 적절한 HTTP 응답을 생성합니다.
impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 각 에러 종류에 따라 적절한 HTTP 상태 코드와 JSON 에러 본문을 생성합니다.
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다 (보안을 위해).
    fn into_response(self) -> Response {
        // match: 패턴 매칭. enum의 각 variant에 대해 다른 처리를 합니다.
        // (status, error, details) 튜플을 반환합니다.
        let (status, error, details) = match self {
            AppError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Failed",
                // json!는 BTreeMap을 {"필드": "메시지"} 객체로 직렬화합니다.
                json!(details),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Not Found",
                json!({ "task": "Task not found" }),
            ),
            // ref: 패턴 매칭에서 값을 이동(move)하지 않고 참조만 빌려옵니다.
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    // 클라이언트에는 일반적인 메시지만 반환 (내부 구현 노출 방지)
                    json!({ "server": "An internal error occurred" }),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    json!({ "server": "An internal error occurred" }),
                )
            }
        };

        // JSON 응답 본문을 생성합니다.
        // 결과: { "error": "Validation Failed", "details": { "priority": "..." } }
        let body = Json(json!({
            "error": error,
            "details": details,
        }));

        // Axum은 튜플 (상태코드, 본문)을 자동으로 HTTP 응답으로 변환합니다.
        (status, body).into_response()
    }
}
