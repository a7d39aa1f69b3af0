//! # haldo — 태스크 관리 API 라이브러리 크레이트
//!
//! 서버 바이너리(main.rs)와 통합 테스트(tests/)가 같은 라우터를 쓸 수 있도록
//! 애플리케이션 본체를 라이브러리로 분리했습니다.
//! 테스트는 `haldo::app(pool)`로 실제 서버와 동일한 라우터를 만들어
//! 포트 바인딩 없이 요청을 흘려보낼 수 있습니다.
//!
//! ## 계층 구조
//! - `routes`: HTTP 핸들러 (요청 추출, 상태 코드, 404 판정)
//! - `db`: SQL 쿼리 함수 (소프트 삭제 조건, 동적 필터 구성)
//! - `models`: 행 구조체 + 요청/응답 DTO + 입력 검증
//! - `error`: AppError와 HTTP 에러 응답 변환
//! - `config`: 환경변수 기반 설정

// `mod` 키워드는 다른 파일을 모듈로 가져옵니다.
// Rust에서는 파일 시스템 구조가 곧 모듈 구조입니다.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::{
    routing::get, // HTTP 메서드별 라우팅 함수
    Router,       // 라우터: URL 경로와 핸들러를 연결하는 구조체
};
use routes::tasks::AppState;
use sqlx::SqlitePool;
use tower_http::{
    // tower-http: HTTP 미들웨어 모음 크레이트
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 로깅 미들웨어
};

/// 연결 풀을 받아 완성된 애플리케이션 라우터를 만듭니다.
///
/// 라우트 등록, 공유 상태 주입, CORS/로깅 미들웨어까지
/// 서버가 실제로 서빙하는 것과 동일한 구성을 반환합니다.
pub fn app(pool: SqlitePool) -> Router {
    // AppState: 모든 라우트 핸들러가 공유하는 데이터를 담는 구조체
    let state = AppState { pool };

    // CORS: 브라우저의 보안 정책. 다른 도메인에서의 API 호출을 허용/차단합니다.
    // 개발 환경에서는 Any(모두 허용)로 설정합니다.
    // 프로덕션에서는 특정 도메인만 허용해야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)   // 모든 출처(origin) 허용
        .allow_methods(Any)  // 모든 HTTP 메서드 허용
        .allow_headers(Any); // 모든 헤더 허용

    Router::new()
        // .route(): URL 패턴과 핸들러 함수를 연결합니다.
        // .post()를 .route()에 체이닝하면 같은 경로에 여러 HTTP 메서드를 매핑할 수 있습니다.
        .route("/tasks", get(routes::list_tasks).post(routes::create_task))
        // {id}는 URL 경로 파라미터 (Path<String>으로 핸들러에서 추출)
        .route(
            "/tasks/{id}",
            get(routes::get_task)
                .patch(routes::update_task)
                .delete(routes::delete_task),
        )
        // 헬스체크 API (서버 상태 확인용)
        .route("/health", get(routes::health_check))
        // .with_state(): 이 라우터의 모든 핸들러에서 AppState를 사용할 수 있게 합니다.
        .with_state(state)
        // .layer(): 미들웨어를 추가합니다. 미들웨어는 요청/응답을 가로채서 처리합니다.
        .layer(cors)
        .layer(TraceLayer::new_for_http()) // HTTP 요청/응답 자동 로깅
}
