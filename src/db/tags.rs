//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그의 get-or-create와 태스크-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name) — name은 UNIQUE
//! - `task_tags`: 태스크와 태그의 다대다(N:M) 관계 테이블
//!
//! 태그는 이 시스템에서 절대 수정/삭제되지 않습니다.
//! 아무 태스크도 참조하지 않게 된 태그도 그대로 남습니다.

use crate::error::AppError;
use crate::models::Tag;
use sqlx::SqlitePool;

/// 원시 태그 문자열 목록을 태그 행 목록으로 변환합니다 (get-or-create).
///
/// 각 이름을 trim + 소문자로 정규화한 뒤:
/// - 공백뿐인 항목은 조용히 버립니다 (에러 아님)
/// - 같은 이름의 태그가 이미 있으면 그 행을 재사용합니다
/// - 없으면 UUIDv7 id로 새 행을 삽입합니다
///
/// 저장소 장애를 제외하면 실패하지 않는 연산입니다.
/// 동시에 같은 이름을 만들려는 두 요청의 경합은 tags.name의 UNIQUE 제약이
/// 막아줍니다 (진 쪽의 INSERT는 DB 에러로 전파됨).
pub async fn get_or_create_tags(
    pool: &SqlitePool,
    names: &[String],
) -> Result<Vec<Tag>, AppError> {
    let mut tags = Vec::new();

    for raw in names {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            continue; // 빈 문자열/공백만 있는 항목은 무시
        }

        // 이미 존재하는 태그인지 조회합니다.
        // fetch_optional(): 결과가 0행이면 None, 1행이면 Some(Tag)을 반환합니다.
        let existing = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = ?")
            .bind(&name)
            .fetch_optional(pool)
            .await?;

        // if let ... else: Some이면 재사용, None이면 새로 삽입합니다.
        let tag = if let Some(tag) = existing {
            tag
        } else {
            let id = uuid::Uuid::now_v7().to_string();
            sqlx::query("INSERT INTO tags (id, name) VALUES (?, ?)")
                .bind(&id)
                .bind(&name)
                .execute(pool)
                .await?;
            Tag { id, name }
        };

        tags.push(tag);
    }

    Ok(tags)
}

/// 태스크의 태그 연결을 주어진 목록으로 전부 교체합니다.
///
/// 기존 연결을 모두 지우고 새 목록을 삽입합니다.
/// `INSERT OR IGNORE`: 입력에 같은 태그가 중복되어 있어도
/// 복합 기본키 충돌을 일으키지 않고 무시합니다.
pub async fn set_task_tags(
    pool: &SqlitePool,
    task_id: &str,
    tags: &[Tag],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM task_tags WHERE task_id = ?")
        .bind(task_id)
        .execute(pool)
        .await?;

    for tag in tags {
        sqlx::query("INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?, ?)")
            .bind(task_id)
            .bind(&tag.id)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// 특정 태스크에 연결된 모든 태그를 조회합니다.
///
/// `task_tags` 중간 테이블을 JOIN하여 태스크에 속한 태그 목록을 가져옵니다.
///
/// ```sql
/// tags ←── task_tags ──→ tasks
///  (1)       (N:M)        (1)
/// ```
pub async fn get_task_tags(pool: &SqlitePool, task_id: &str) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name
        FROM tags t
        JOIN task_tags tt ON tt.tag_id = t.id
        WHERE tt.task_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(task_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
