//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `tasks`: 태스크 CRUD 핸들러와 공유 상태(AppState)

pub mod health;
pub mod tasks;

// 각 모듈의 핸들러 함수들을 재공개하여
// `routes::list_tasks`처럼 바로 접근 가능하게 합니다.
pub use health::*;
pub use tasks::*;
