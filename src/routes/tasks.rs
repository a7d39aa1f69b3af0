//! # 태스크(Task) 라우트 핸들러
//!
//! 태스크의 생성/목록/조회/부분 수정/소프트 삭제를 처리하는
//! HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /tasks | `create_task` | 새 태스크 생성 (201) |
//! | GET | /tasks | `list_tasks` | 필터 + 페이지네이션 목록 |
//! | GET | /tasks/{id} | `get_task` | 단일 태스크 조회 |
//! | PATCH | /tasks/{id} | `update_task` | 부분 업데이트 |
//! | DELETE | /tasks/{id} | `delete_task` | 소프트 삭제 (204) |
//!
//! ## Axum 핸들러 패턴
//! 각 함수는 Axum의 **추출자(Extractor)** 패턴을 따릅니다:
//! - `State(state)`: 애플리케이션 공유 상태 (DB 풀)
//! - `Path(id)`: URL 경로의 변수 (`{id}` 부분)
//! - `Query(query)`: 쿼리 문자열을 구조체로 파싱
//! - `Json(req)`: 요청 본문을 구조체로 파싱
//!
//! 반환 타입이 `Result<T, AppError>`이면, Axum이 자동으로:
//! - `Ok(T)` → T를 HTTP 응답으로 변환 (IntoResponse 트레이트 사용)
//! - `Err(AppError)` → 에러 JSON 응답으로 변환 (422/404/500)

use crate::{
    db,              // 데이터베이스 접근 계층
    error::AppError, // 에러 타입 (자동으로 HTTP 에러 응답으로 변환됨)
    models::*,       // 요청/응답 구조체들
};
use axum::{
    extract::{Path, Query, State}, // Axum 추출자
    http::StatusCode,              // HTTP 상태 코드 (201, 204 등)
    Json,                          // JSON 요청/응답 래퍼
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// Axum의 State Extractor는 내부적으로 AppState를 clone하므로 Clone이 필수입니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 실제 풀이 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
}

/// `POST /tasks` — 새 태스크를 생성합니다.
///
/// 검증(제목 필수/길이, 우선순위 범위, 과거 마감일 금지)을 통과하면
/// 행을 삽입하고, 태그를 get-or-create로 해석해 연결한 뒤,
/// 생성된 id와 타임스탬프까지 채워진 완전한 태스크를 201로 반환합니다.
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    // 검증 실패 시 필드별 메시지 맵과 함께 422로 끝납니다.
    req.validate()?;

    // UUIDv7: 시간 기반 UUID로, 생성 순서대로 정렬됩니다
    let id = uuid::Uuid::now_v7().to_string();
    let task = db::create_task(&state.pool, &id, &req).await?;

    // 태그 필드가 있으면 이름들을 태그 행으로 해석해 연결합니다.
    // 빈 목록이면 get_or_create_tags가 빈 Vec을 돌려주고 연결도 비게 됩니다.
    if let Some(names) = &req.tags {
        let tags = db::get_or_create_tags(&state.pool, names).await?;
        db::set_task_tags(&state.pool, &id, &tags).await?;
    }

    // 응답용 태그 목록은 DB에서 다시 읽습니다 (정규화/중복 제거가 반영된 상태).
    let tags = db::get_task_tags(&state.pool, &id).await?;
    // (StatusCode, Json<T>) 튜플: 상태 코드를 지정한 JSON 응답이 됩니다.
    Ok((StatusCode::CREATED, Json(TaskResponse::new(task, tags))))
}

/// `GET /tasks` — 필터와 페이지네이션을 적용한 태스크 목록을 조회합니다.
///
/// 응답: `{ "total": N, "limit": L, "offset": O, "tasks": [...] }`
/// 소프트 삭제된 태스크는 항상 제외됩니다.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<PaginatedTaskResponse>, AppError> {
    // 범위 규칙(priority 1~5, limit 1~100, offset ≥ 0) 위반은 422
    query.validate()?;

    let tag_names = query.tag_names();
    let (total, tasks) = db::list_tasks(
        &state.pool,
        query.completed,
        query.priority,
        &tag_names,
        query.limit(),
        query.offset(),
    )
    .await?;

    // 각 태스크의 태그 목록을 붙여 응답 형태로 변환합니다.
    let mut responses = Vec::with_capacity(tasks.len());
    for task in tasks {
        let tags = db::get_task_tags(&state.pool, &task.id).await?;
        responses.push(TaskResponse::new(task, tags));
    }

    Ok(Json(PaginatedTaskResponse {
        total,
        limit: query.limit(),
        offset: query.offset(),
        tasks: responses,
    }))
}

/// `GET /tasks/{id}` — 단일 태스크를 조회합니다.
///
/// 존재하지 않는 id와 소프트 삭제된 태스크 모두 404입니다.
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, AppError> {
    let task = db::get_task(&state.pool, &id)
        .await?
        // ok_or(): Option<Task>을 Result<Task, AppError>로 변환
        // None(태스크 없음)이면 NotFound 에러 → HTTP 404 응답
        .ok_or(AppError::NotFound)?;

    let tags = db::get_task_tags(&state.pool, &id).await?;
    Ok(Json(TaskResponse::new(task, tags)))
}

/// `PATCH /tasks/{id}` — 태스크를 부분 업데이트합니다.
///
/// 본문에 포함된 필드만 수정합니다. `tags`가 포함되어 있으면 (빈 배열 포함)
/// 태그 연결 전체를 그 목록으로 교체합니다. 빈 본문도 유효하며,
/// 그 경우 `updated_at`만 갱신됩니다.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    // 본문에 있는 필드만 검증합니다 (부분 업데이트 규칙)
    req.validate()?;

    // 대상 존재 확인 — 없거나 소프트 삭제된 경우 404
    let _ = db::get_task(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    db::update_task(&state.pool, &id, &req).await?;

    // tags 필드가 존재하면 연결 전체 교체 (빈 배열이면 전부 해제)
    if let Some(names) = &req.tags {
        let tags = db::get_or_create_tags(&state.pool, names).await?;
        db::set_task_tags(&state.pool, &id, &tags).await?;
    }

    // 갱신된 updated_at까지 반영된 최신 상태를 다시 조회하여 반환합니다.
    let task = db::get_task(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tags = db::get_task_tags(&state.pool, &id).await?;
    Ok(Json(TaskResponse::new(task, tags)))
}

/// `DELETE /tasks/{id}` — 태스크를 소프트 삭제합니다.
///
/// 행을 지우지 않고 `deleted` 플래그만 세웁니다. 성공 시 204 No Content.
/// 이미 삭제된 태스크는 조회 단계에서 걸러지므로 두 번째 호출은 404가 됩니다.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    // 존재 확인 (소프트 삭제된 태스크 포함 404)
    let _ = db::get_task(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    let deleted = db::soft_delete_task(&state.pool, &id).await?;
    if !deleted {
        // 조회와 삭제 사이에 다른 요청이 먼저 지운 경우
        return Err(AppError::NotFound);
    }

    // StatusCode::NO_CONTENT: HTTP 204 (성공했지만 반환할 본문 없음)
    Ok(StatusCode::NO_CONTENT)
}
