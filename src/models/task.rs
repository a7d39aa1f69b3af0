//! # 태스크 모델 정의
//!
//! 태스크(Task) API에서 사용하는 데이터 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `Task`: 데이터베이스에 저장된 태스크 한 행을 표현 (soft delete 플래그 포함)
//! - `TaskResponse`: API 응답용 형태 (태그 목록 포함, `deleted`는 노출하지 않음)
//! - `PaginatedTaskResponse`: 목록 조회 응답의 페이지네이션 봉투(envelope)
//! - `CreateTaskRequest`: 태스크 생성 시 클라이언트가 보내는 JSON 본문
//! - `UpdateTaskRequest`: 부분 업데이트(PATCH) 시 클라이언트가 보내는 JSON 본문
//! - `ListTasksQuery`: 목록 조회의 쿼리 파라미터 (필터 + 페이지네이션)
//!
//! 요청 구조체는 각자 `validate()` 메서드로 입력 규칙을 검사하고,
//! 위반된 필드를 전부 모아 `AppError::Validation`(HTTP 422)으로 반환합니다.

use crate::error::AppError;
use crate::models::Tag;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 제목 최대 길이 (문자 수 기준)
const TITLE_MAX_CHARS: usize = 200;

/// 태스크 엔티티 — DB의 `tasks` 테이블 한 행(row)에 대응합니다.
///
/// `deleted` 플래그까지 그대로 담는 저장소 계층의 표현이므로
/// API 응답에는 이 구조체 대신 `TaskResponse`를 사용합니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    /// "YYYY-MM-DD" 형식 문자열. DB에 TEXT로 저장됩니다.
    pub due_date: Option<String>,
    /// SQLite의 INTEGER 0/1이 bool로 디코딩됩니다.
    pub completed: bool,
    /// 소프트 삭제 플래그. true면 모든 조회에서 제외됩니다.
    pub deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// API 응답용 태스크 — `Task` 행에 태그 목록을 붙이고 `deleted`를 뺀 형태입니다.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    pub due_date: Option<String>,
    pub completed: bool,
    pub tags: Vec<Tag>,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskResponse {
    /// DB 행과 태그 목록으로 응답 구조체를 만듭니다.
    pub fn new(task: Task, tags: Vec<Tag>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            due_date: task.due_date,
            completed: task.completed,
            tags,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// `GET /tasks` 응답 봉투 — 페이지와 함께 전체 건수를 돌려줍니다.
///
/// `total`은 필터 적용 후 / 페이지네이션 적용 전의 전체 건수입니다.
#[derive(Debug, Serialize)]
pub struct PaginatedTaskResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub tasks: Vec<TaskResponse>,
}

/// 태스크 생성 요청 — `POST /tasks`의 요청 본문(body)에 해당합니다.
///
/// `title`도 Option인 이유: 필수 필드 누락을 Axum의 파싱 단계에서 떨어뜨리지 않고
/// `validate()`에서 잡아, 다른 위반과 함께 필드별 메시지 맵으로 돌려주기 위해서입니다.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// 태스크 제목 (필수, trim 후 1~200자)
    pub title: Option<String>,
    /// 상세 설명 (선택)
    pub description: Option<String>,
    /// 우선순위 1~5 (5가 가장 높음), 생략 시 3
    pub priority: Option<i64>,
    /// 마감일 "YYYY-MM-DD" — serde가 ISO 날짜 문자열을 NaiveDate로 파싱합니다.
    pub due_date: Option<NaiveDate>,
    /// 태그 이름 목록 (선택). 저장 전에 trim + 소문자로 정규화됩니다.
    pub tags: Option<Vec<String>>,
}

impl CreateTaskRequest {
    /// 생성 요청의 모든 필드 규칙을 검사합니다.
    ///
    /// 위반된 필드를 전부 모아서 한 번에 반환합니다.
    /// 첫 위반에서 멈추면 클라이언트가 수정-재시도를 반복해야 하므로,
    /// 필드별 메시지를 모두 담습니다.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut details = BTreeMap::new();

        match &self.title {
            None => {
                details.insert("title".to_string(), "title is required".to_string());
            }
            Some(title) => validate_title(title, &mut details),
        }

        if let Some(priority) = self.priority {
            validate_priority(priority, &mut details);
        }

        if let Some(due_date) = self.due_date {
            validate_due_date(due_date, &mut details);
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(details))
        }
    }
}

/// 태스크 부분 업데이트 요청 — `PATCH /tasks/{id}`의 요청 본문에 해당합니다.
///
/// 모든 필드가 Option인 이유: PATCH는 부분 업데이트(partial update)를 의미합니다.
/// 클라이언트가 변경하고 싶은 필드만 보내면 되고, 빠진 필드는 건드리지 않습니다.
/// `tags`는 빈 배열 `[]`도 의미가 있습니다: 태그 연결을 전부 해제합니다.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// 변경할 제목 (보내는 경우 trim 후 1~200자)
    pub title: Option<String>,
    pub description: Option<String>,
    /// 변경할 우선순위 (보내는 경우 1~5)
    pub priority: Option<i64>,
    /// 변경할 마감일 (보내는 경우 과거 날짜 금지)
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
    /// 보내는 경우 기존 태그 연결 전체를 이 목록으로 교체합니다.
    pub tags: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// 본문에 포함된 필드에만 생성과 동일한 규칙을 적용합니다.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut details = BTreeMap::new();

        if let Some(title) = &self.title {
            validate_title(title, &mut details);
        }

        if let Some(priority) = self.priority {
            validate_priority(priority, &mut details);
        }

        if let Some(due_date) = self.due_date {
            validate_due_date(due_date, &mut details);
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(details))
        }
    }
}

/// `GET /tasks`의 쿼리 파라미터 — 필터와 페이지네이션을 담습니다.
///
/// 예: `/tasks?completed=false&tags=work,urgent&limit=10&offset=20`
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// 완료 여부로 필터 (정확히 일치)
    pub completed: Option<bool>,
    /// 우선순위로 필터 (정확히 일치, 1~5)
    pub priority: Option<i64>,
    /// 쉼표로 구분된 태그 이름 목록. 하나라도 가진 태스크가 매칭됩니다(any-match).
    pub tags: Option<String>,
    /// 페이지 크기 (1~100, 기본값 20)
    pub limit: Option<i64>,
    /// 페이지 시작 위치 (0 이상, 기본값 0)
    pub offset: Option<i64>,
}

impl ListTasksQuery {
    /// 쿼리 파라미터의 범위 규칙을 검사합니다.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut details = BTreeMap::new();

        if let Some(priority) = self.priority {
            validate_priority(priority, &mut details);
        }

        if !(1..=100).contains(&self.limit()) {
            details.insert(
                "limit".to_string(),
                "limit must be between 1 and 100".to_string(),
            );
        }

        if self.offset() < 0 {
            details.insert(
                "offset".to_string(),
                "offset must be greater than or equal to 0".to_string(),
            );
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(details))
        }
    }

    /// 페이지 크기 (생략 시 20)
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20)
    }

    /// 페이지 시작 위치 (생략 시 0)
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    /// CSV 태그 파라미터를 정규화된 이름 목록으로 풀어줍니다.
    ///
    /// 저장 시와 동일하게 trim + 소문자 처리하고, 빈 항목은 버립니다.
    /// `tags` 파라미터 자체가 없으면 빈 Vec을 반환합니다 (필터 미적용).
    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .as_deref() // Option<String> → Option<&str>
            .unwrap_or("")
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

// ── 공용 필드 검증 함수 ──
// 생성/수정/목록 요청이 같은 규칙을 공유하므로 모듈 내부 함수로 분리했습니다.

fn validate_title(title: &str, details: &mut BTreeMap<String, String>) {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        details.insert(
            "title".to_string(),
            "title must not be empty or whitespace".to_string(),
        );
    } else if trimmed.chars().count() > TITLE_MAX_CHARS {
        details.insert(
            "title".to_string(),
            "title must be at most 200 characters".to_string(),
        );
    }
}

fn validate_priority(priority: i64, details: &mut BTreeMap<String, String>) {
    if !(1..=5).contains(&priority) {
        details.insert(
            "priority".to_string(),
            "priority must be between 1 and 5".to_string(),
        );
    }
}

fn validate_due_date(due_date: NaiveDate, details: &mut BTreeMap<String, String>) {
    // 서버의 로컬 날짜 기준 "오늘"보다 이전이면 거부합니다. 오늘 자체는 허용.
    if due_date < Local::now().date_naive() {
        details.insert(
            "due_date".to_string(),
            "due_date must not be in the past".to_string(),
        );
    }
}
