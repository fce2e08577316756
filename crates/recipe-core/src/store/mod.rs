//! 저장소 추상화.
//!
//! 서비스 계층이 소비하는 영속성 협력자 인터페이스입니다.
//! 구현체는 자체적으로 동시성 안전성을 보장해야 합니다.
//!
//! - [`MemoryStore`]: 테스트/개발용 인메모리 구현
//! - Postgres 구현은 API 크레이트의 `repository` 모듈에 있습니다.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{
    Id, Ingredient, NewRecipe, NewRecipeDirection, NewRecipeIngredient, Profile, Recipe,
    RecipeChanges, RecipeDirection, RecipeIngredient,
};

/// 레시피 API 영속성 인터페이스.
///
/// 조회 메서드는 레코드가 없으면 `Ok(None)`을 반환하고,
/// 삭제 메서드는 실제로 삭제되었는지 여부를 반환합니다.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    // ==================== Profiles ====================

    /// 사용자 이름으로 프로필 조회.
    async fn find_profile_by_username(&self, username: &str) -> StoreResult<Option<Profile>>;

    /// 프로필 생성. 이름이 중복되면 [`StoreError::Conflict`](crate::StoreError::Conflict).
    async fn create_profile(&self, username: &str, password_hash: &str) -> StoreResult<Profile>;

    // ==================== Recipes ====================

    /// 레시피 목록 (카테고리 필터 선택).
    async fn list_recipes(&self, category: Option<&str>) -> StoreResult<Vec<Recipe>>;

    async fn get_recipe(&self, id: Id) -> StoreResult<Option<Recipe>>;

    async fn create_recipe(&self, recipe: NewRecipe) -> StoreResult<Recipe>;

    async fn update_recipe(&self, id: Id, changes: RecipeChanges) -> StoreResult<Recipe>;

    /// 레시피 삭제. 하위 재료 연결과 조리 단계도 함께 삭제됩니다.
    async fn delete_recipe(&self, id: Id) -> StoreResult<bool>;

    // ==================== Recipe ingredients ====================

    async fn list_recipe_ingredients(&self, recipe_id: Id) -> StoreResult<Vec<RecipeIngredient>>;

    async fn get_recipe_ingredient(&self, id: Id) -> StoreResult<Option<RecipeIngredient>>;

    async fn create_recipe_ingredient(
        &self,
        link: NewRecipeIngredient,
    ) -> StoreResult<RecipeIngredient>;

    async fn update_recipe_ingredient(&self, id: Id, quantity: &str)
        -> StoreResult<RecipeIngredient>;

    async fn delete_recipe_ingredient(&self, id: Id) -> StoreResult<bool>;

    // ==================== Recipe directions ====================

    async fn list_recipe_directions(&self, recipe_id: Id) -> StoreResult<Vec<RecipeDirection>>;

    async fn get_recipe_direction(&self, id: Id) -> StoreResult<Option<RecipeDirection>>;

    async fn create_recipe_direction(
        &self,
        direction: NewRecipeDirection,
    ) -> StoreResult<RecipeDirection>;

    async fn update_recipe_direction(
        &self,
        id: Id,
        description: &str,
    ) -> StoreResult<RecipeDirection>;

    async fn delete_recipe_direction(&self, id: Id) -> StoreResult<bool>;

    // ==================== Ingredient dictionary ====================

    async fn list_ingredients(&self) -> StoreResult<Vec<Ingredient>>;

    async fn get_ingredient(&self, id: Id) -> StoreResult<Option<Ingredient>>;

    async fn create_ingredient(&self, name: &str) -> StoreResult<Ingredient>;

    async fn update_ingredient(&self, id: Id, name: &str) -> StoreResult<Ingredient>;
}
