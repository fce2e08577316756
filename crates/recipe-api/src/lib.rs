//! 레시피 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 서명 토큰(HS256) 인증 및 권한 검사
//! - 회원 가입/로그인
//! - PostgreSQL 저장소
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰 인증 및 권한 관리
//! - [`services`]: 계정 서비스
//! - [`repository`]: PostgreSQL 저장소
//! - [`config`]: 환경 변수 설정
//! - [`error`]: HTTP 에러 응답

pub mod auth;
pub mod config;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{AuthPrincipal, Claims, Principal, Privileges, TokenService};
pub use config::ApiConfig;
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
