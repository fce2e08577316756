//! # Recipe Core
//!
//! 레시피 API의 핵심 도메인 모델 및 비즈니스 규칙을 제공합니다.
//!
//! 이 크레이트는 HTTP 계층과 독립적으로 다음을 제공합니다:
//! - 레시피, 재료, 조리 단계, 사용자 프로필 도메인 모델
//! - 요청 페이로드 및 필드 검증 규칙
//! - 저장소 추상화 ([`RecipeStore`]) 및 인메모리 구현
//! - 소유권 검사 ([`OwnershipGuard`])
//! - 레시피/재료 사전 서비스
//! - 로깅 인프라

pub mod error;
pub mod logging;
pub mod models;
pub mod ownership;
pub mod requests;
pub mod service;
pub mod store;

pub use error::{ErrorKind, ServiceError, ServiceResult, StoreError, StoreResult};
pub use logging::{init_logging, init_logging_from_env, LogConfig, LogFormat, DEFAULT_LOG_FILTER};
pub use models::*;
pub use ownership::{OwnerLookup, Ownership, OwnershipGuard, RecipeOwners};
pub use requests::*;
pub use service::{IngredientCatalog, RecipeService};
pub use store::{MemoryStore, RecipeStore};
