//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 `Arc`로 래핑되어 Axum의 State extractor로 주입됩니다.

use std::sync::Arc;

use recipe_core::{IngredientCatalog, RecipeService, RecipeStore};

use crate::auth::TokenService;
use crate::services::AccountService;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 토큰 발급/검증 서비스 (읽기 전용)
    pub tokens: Arc<TokenService>,

    /// 저장소 (인메모리 또는 PostgreSQL)
    pub store: Arc<dyn RecipeStore>,

    /// 레시피 및 하위 리소스 서비스
    pub recipes: RecipeService,

    /// 공용 재료 사전
    pub catalog: IngredientCatalog,

    /// 회원 가입/로그인
    pub accounts: AccountService,

    /// 서버 시작 시간 (Unix timestamp)
    pub started_at: i64,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(tokens: Arc<TokenService>, store: Arc<dyn RecipeStore>) -> Self {
        Self {
            recipes: RecipeService::new(store.clone()),
            catalog: IngredientCatalog::new(store.clone()),
            accounts: AccountService::new(store.clone(), tokens.clone()),
            tokens,
            store,
            started_at: chrono::Utc::now().timestamp(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now().timestamp() - self.started_at
    }
}

/// 테스트용 상태 생성 (인메모리 저장소).
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use secrecy::SecretString;

    let tokens = TokenService::new(&SecretString::from("test-jwt-key".to_string()))
        .expect("test secret is not empty");
    AppState::new(Arc::new(tokens), Arc::new(recipe_core::MemoryStore::new()))
}
