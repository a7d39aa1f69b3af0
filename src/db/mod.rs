//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `tags`: 태그 get-or-create 및 태스크-태그 관계 쿼리
//! - `tasks`: 태스크의 CRUD(생성/조회/수정/소프트 삭제) 쿼리

pub mod tags;
pub mod tasks;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::list_tasks`처럼 바로 접근할 수 있게 합니다.
pub use tags::*;
pub use tasks::*;
