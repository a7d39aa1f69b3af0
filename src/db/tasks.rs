//! # 태스크 데이터베이스 쿼리 모듈
//!
//! `tasks` 테이블에 대한 CRUD 쿼리 함수들이 정의되어 있습니다.
//! 모든 함수는 `async`이며 `SqlitePool`을 받아 데이터베이스와 상호작용합니다.
//! 에러 발생 시 `AppError`를 반환합니다.
//!
//! ## 소프트 삭제
//! DELETE는 행을 지우지 않고 `deleted` 플래그만 1로 바꿉니다.
//! 따라서 이 모듈의 **모든 조회 쿼리는 `deleted = 0` 조건을 포함**해야 합니다.
//! 조건이 빠진 조회 하나가 삭제된 태스크를 되살려 보이게 만듭니다.

use crate::error::AppError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};
use sqlx::SqlitePool;

/// SELECT 절에서 반복되는 컬럼 목록입니다.
const TASK_COLUMNS: &str =
    "id, title, description, priority, due_date, completed, deleted, created_at, updated_at";

/// 새 태스크를 생성하고 생성된 행을 반환합니다.
///
/// ## 처리 흐름
/// 1. UUIDv7 id는 호출자(라우트 핸들러)가 만들어 전달합니다
/// 2. INSERT 쿼리로 DB에 저장 — completed/deleted/타임스탬프는 DEFAULT 값 사용
/// 3. 방금 생성한 행을 다시 조회하여 반환 (DB의 기본값이 적용된 완전한 데이터)
///
/// 제목은 trim해서 저장합니다. `validate()`를 통과한 요청만 여기로 오므로
/// title은 항상 존재하지만, 소유권 문제 없이 다루기 위해 Option을 그대로 받습니다.
pub async fn create_task(
    pool: &SqlitePool,
    id: &str,
    req: &CreateTaskRequest,
) -> Result<Task, AppError> {
    let title = req.title.as_deref().unwrap_or("").trim();
    // 우선순위 생략 시 기본값 3 (중간)
    let priority = req.priority.unwrap_or(3);
    // NaiveDate → "YYYY-MM-DD" 문자열. Option 안에서 변환합니다.
    let due_date = req.due_date.map(|d| d.to_string());

    sqlx::query(
        r#"
        INSERT INTO tasks (id, title, description, priority, due_date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(&req.description) // Option<String>: None이면 SQL NULL로 바인딩됩니다
    .bind(priority)
    .bind(&due_date)
    .execute(pool)
    .await?;

    get_task(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created task".to_string()))
}

/// ID로 단일 태스크를 조회합니다. 소프트 삭제된 태스크는 제외합니다.
///
/// # 반환값
/// - `Ok(Some(Task))`: 태스크를 찾은 경우
/// - `Ok(None)`: 해당 ID가 없거나 이미 소프트 삭제된 경우 (구분 불가)
/// - `Err(AppError)`: DB 에러 발생 시
pub async fn get_task(pool: &SqlitePool, id: &str) -> Result<Option<Task>, AppError> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND deleted = 0");
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(task)
}

/// 필터와 페이지네이션을 적용해 태스크 목록을 조회합니다.
///
/// # 매개변수
/// - `completed`: Some이면 완료 여부가 정확히 일치하는 태스크만
/// - `priority`: Some이면 우선순위가 정확히 일치하는 태스크만
/// - `tags`: 비어 있지 않으면 이 중 하나라도 가진 태스크만 (any-match).
///   존재하지 않는 태그 이름은 그냥 0건 매칭으로 이어집니다 (에러 아님).
/// - `limit`/`offset`: 페이지네이션
///
/// # 반환값
/// `(total, page)` — total은 필터 적용 후 / limit·offset 적용 전의 전체 건수입니다.
/// 목록은 생성 시각 내림차순(최신 먼저)으로 정렬됩니다.
pub async fn list_tasks(
    pool: &SqlitePool,
    completed: Option<bool>,
    priority: Option<i64>,
    tags: &[String],
    limit: i64,
    offset: i64,
) -> Result<(i64, Vec<Task>), AppError> {
    // ── 동적 WHERE 절 구성 ──
    // 활성 필터만 SQL에 포함합니다. 소프트 삭제 제외 조건은 항상 들어갑니다.
    // bindings: 나중에 SQL의 ? 자리에 순서대로 바인딩할 값들.
    // SQLite는 컬럼 타입 친화도(affinity)로 "1" 같은 문자열을 INTEGER 비교에
    // 알아서 변환하므로, 값들을 문자열 하나의 Vec으로 모을 수 있습니다.
    let mut where_sql = String::from("WHERE deleted = 0");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(completed) = completed {
        where_sql.push_str(" AND completed = ?");
        bindings.push(if completed { "1" } else { "0" }.to_string());
    }

    if let Some(priority) = priority {
        where_sql.push_str(" AND priority = ?");
        bindings.push(priority.to_string());
    }

    if !tags.is_empty() {
        // IN 서브쿼리 방식: JOIN + DISTINCT 대신 id 포함 여부로 거릅니다.
        // 태스크가 요청된 태그를 여러 개 갖고 있어도 행이 중복되지 않고,
        // 같은 WHERE 절을 COUNT 쿼리에 그대로 재사용할 수 있습니다.
        let placeholders = vec!["?"; tags.len()].join(", ");
        where_sql.push_str(&format!(
            " AND id IN (SELECT tt.task_id FROM task_tags tt \
             JOIN tags t ON t.id = tt.tag_id WHERE t.name IN ({placeholders}))"
        ));
        bindings.extend(tags.iter().cloned());
    }

    // ── 전체 건수 조회 (페이지네이션 적용 전) ──
    let count_sql = format!("SELECT COUNT(*) FROM tasks {where_sql}");
    // query_scalar: 단일 값(여기서는 COUNT 결과 하나)을 바로 꺼내는 쿼리
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for binding in &bindings {
        count_query = count_query.bind(binding);
    }
    let total = count_query.fetch_one(pool).await?;

    // ── 페이지 조회 ──
    // created_at이 같은 행(밀리초 충돌)은 id로 순서를 고정합니다.
    // UUIDv7은 시간 기반이므로 id 내림차순도 대체로 최신 먼저입니다.
    let page_sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks {where_sql} \
         ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut page_query = sqlx::query_as::<_, Task>(&page_sql);
    for binding in &bindings {
        page_query = page_query.bind(binding);
    }
    // limit/offset은 정수 타입 그대로 바인딩합니다 (LIMIT 절은 정수를 요구).
    let tasks = page_query.bind(limit).bind(offset).fetch_all(pool).await?;

    Ok((total, tasks))
}

/// 태스크의 스칼라 필드들을 수정합니다 (부분 업데이트 - PATCH 방식).
///
/// 요청에 포함된 필드만 업데이트하고, 나머지는 그대로 유지합니다.
/// 동적으로 SQL UPDATE 쿼리를 구성합니다. `updated_at`은 항상 갱신되므로
/// 빈 본문의 PATCH도 `updated_at`만 바뀌는 쓰기가 됩니다.
///
/// 태그 교체는 이 함수가 아니라 `db::tags::set_task_tags`가 담당합니다.
/// 대상 태스크의 존재 확인(404 처리)은 라우트 핸들러가 먼저 수행합니다.
pub async fn update_task(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateTaskRequest,
) -> Result<(), AppError> {
    let mut query =
        String::from("UPDATE tasks SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')");
    let mut bindings: Vec<String> = Vec::new();

    // if let Some(x) = ...: Option이 Some인 경우에만 실행하는 패턴 매칭
    if let Some(title) = &req.title {
        query.push_str(", title = ?");
        bindings.push(title.trim().to_string());
    }

    if let Some(description) = &req.description {
        query.push_str(", description = ?");
        bindings.push(description.clone());
    }

    if let Some(priority) = req.priority {
        query.push_str(", priority = ?");
        bindings.push(priority.to_string());
    }

    if let Some(due_date) = req.due_date {
        query.push_str(", due_date = ?");
        bindings.push(due_date.to_string());
    }

    if let Some(completed) = req.completed {
        query.push_str(", completed = ?");
        // SQLite에는 BOOLEAN 타입이 없어 INTEGER 0/1로 처리합니다.
        bindings.push(if completed { "1" } else { "0" }.to_string());
    }

    // WHERE 절 추가 (대상 태스크만 수정, 소프트 삭제된 행은 건드리지 않음)
    query.push_str(" WHERE id = ? AND deleted = 0");
    bindings.push(id.to_string());

    let mut query_builder = sqlx::query(&query);
    for binding in &bindings {
        query_builder = query_builder.bind(binding);
    }
    query_builder.execute(pool).await?;

    Ok(())
}

/// 태스크를 소프트 삭제합니다.
///
/// 행을 지우지 않고 `deleted` 플래그만 1로 바꿉니다.
/// 태그 연결(task_tags)도 그대로 둡니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제 성공
/// - `Ok(false)`: 해당 ID가 없거나 이미 삭제된 경우 (영향받은 행 0)
pub async fn soft_delete_task(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE tasks \
         SET deleted = 1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
         WHERE id = ? AND deleted = 0",
    )
    .bind(id)
    .execute(pool)
    .await?;

    // rows_affected(): 쿼리에 의해 영향받은 행 수를 반환합니다.
    Ok(result.rows_affected() > 0)
}
