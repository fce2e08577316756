//! 레시피 서비스.
//!
//! 레시피와 하위 엔티티(재료 연결, 조리 단계)의 조회/변경을 담당합니다.
//!
//! # 처리 순서
//!
//! - 생성: 페이로드 검증 → 부모 레시피 확인 → 소유권 → 참조 ID 확인 → 생성
//! - 수정: 대상 확인 → 페이로드 검증 → 소유권 → 반영
//! - 삭제: 부모 확인 → 소유권 → 대상이 이미 없으면 성공
//!
//! 하위 엔티티의 `recipe_id`가 경로의 레시피와 다르면 없는 것으로 취급합니다.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    Id, NewRecipe, NewRecipeDirection, NewRecipeIngredient, Recipe, RecipeChanges,
    RecipeDirection, RecipeIngredient,
};
use crate::ownership::{Ownership, OwnershipGuard, RecipeOwners};
use crate::requests::{
    normalize_and_validate, CreateRecipeIngredientRequest, RecipeDirectionRequest, RecipeRequest,
    UpdateRecipeIngredientRequest,
};
use crate::store::RecipeStore;

/// 레시피 서비스.
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    fn guard(&self) -> OwnershipGuard<RecipeOwners<'_>> {
        OwnershipGuard::new(RecipeOwners(self.store.as_ref()))
    }

    /// 레시피 존재 확인. 없으면 검증 에러.
    async fn require_recipe(&self, recipe_id: Id) -> ServiceResult<Recipe> {
        self.store
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(ServiceError::item_not_found)
    }

    // ==================== Recipes ====================

    /// 레시피 목록. 카테고리가 비어 있으면 전체.
    pub async fn list_recipes(&self, category: Option<&str>) -> ServiceResult<Vec<Recipe>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        Ok(self.store.list_recipes(category).await?)
    }

    /// 레시피 생성. 소유자는 요청자로 고정됩니다.
    pub async fn create_recipe(
        &self,
        actor_id: Id,
        mut request: RecipeRequest,
    ) -> ServiceResult<Recipe> {
        normalize_and_validate(&mut request)?;

        let recipe = self
            .store
            .create_recipe(NewRecipe {
                name: request.name,
                description: request.description,
                category: request.category,
                cooking_time: request.cooking_time,
                owner_id: actor_id,
            })
            .await?;

        info!(recipe_id = recipe.id, owner_id = actor_id, "Recipe created");
        Ok(recipe)
    }

    /// 레시피 수정.
    pub async fn update_recipe(
        &self,
        recipe_id: Id,
        actor_id: Id,
        mut request: RecipeRequest,
    ) -> ServiceResult<Recipe> {
        let ownership = self.guard().check(recipe_id, actor_id).await?;
        if ownership == Ownership::Missing {
            return Err(ServiceError::item_not_found());
        }
        normalize_and_validate(&mut request)?;
        ownership.require_owned()?;

        let recipe = self
            .store
            .update_recipe(
                recipe_id,
                RecipeChanges {
                    name: request.name,
                    description: request.description,
                    category: request.category,
                    cooking_time: request.cooking_time,
                },
            )
            .await?;

        debug!(recipe_id, "Recipe updated");
        Ok(recipe)
    }

    /// 레시피 삭제. 이미 없으면 성공으로 취급합니다.
    pub async fn delete_recipe(&self, recipe_id: Id, actor_id: Id) -> ServiceResult<()> {
        let proceed = self
            .guard()
            .check(recipe_id, actor_id)
            .await?
            .require_owned_or_absent()?;

        if proceed {
            self.store.delete_recipe(recipe_id).await?;
            info!(recipe_id, "Recipe deleted");
        }
        Ok(())
    }

    // ==================== Recipe ingredients ====================

    /// 레시피의 재료 목록.
    pub async fn list_ingredients(&self, recipe_id: Id) -> ServiceResult<Vec<RecipeIngredient>> {
        self.require_recipe(recipe_id).await?;
        Ok(self.store.list_recipe_ingredients(recipe_id).await?)
    }

    /// 레시피에 재료 연결 추가.
    pub async fn create_ingredient(
        &self,
        recipe_id: Id,
        actor_id: Id,
        mut request: CreateRecipeIngredientRequest,
    ) -> ServiceResult<RecipeIngredient> {
        normalize_and_validate(&mut request)?;
        self.guard()
            .check(recipe_id, actor_id)
            .await?
            .require_owned()?;

        if self.store.get_ingredient(request.ingredient_id).await?.is_none() {
            return Err(ServiceError::item_not_found());
        }

        let link = self
            .store
            .create_recipe_ingredient(NewRecipeIngredient {
                recipe_id,
                ingredient_id: request.ingredient_id,
                quantity: request.quantity,
            })
            .await?;

        debug!(recipe_id, link_id = link.id, "Recipe ingredient added");
        Ok(link)
    }

    /// 재료 연결 수량 수정.
    ///
    /// 연결 조회는 소유권 확인 이후에만 수행합니다.
    pub async fn update_ingredient(
        &self,
        recipe_id: Id,
        link_id: Id,
        actor_id: Id,
        mut request: UpdateRecipeIngredientRequest,
    ) -> ServiceResult<RecipeIngredient> {
        let ownership = self.guard().check(recipe_id, actor_id).await?;
        if ownership == Ownership::Missing {
            return Err(ServiceError::item_not_found());
        }
        normalize_and_validate(&mut request)?;
        ownership.require_owned()?;

        let link = self.store.get_recipe_ingredient(link_id).await?;
        if !link.is_some_and(|l| l.recipe_id == recipe_id) {
            return Err(ServiceError::item_not_found());
        }

        Ok(self
            .store
            .update_recipe_ingredient(link_id, &request.quantity)
            .await?)
    }

    /// 재료 연결 삭제. 연결이 이미 없으면 성공.
    pub async fn delete_ingredient(
        &self,
        recipe_id: Id,
        link_id: Id,
        actor_id: Id,
    ) -> ServiceResult<()> {
        self.guard()
            .check(recipe_id, actor_id)
            .await?
            .require_owned()?;

        let link = self.store.get_recipe_ingredient(link_id).await?;
        if link.is_some_and(|l| l.recipe_id == recipe_id) {
            self.store.delete_recipe_ingredient(link_id).await?;
            debug!(recipe_id, link_id, "Recipe ingredient removed");
        }
        Ok(())
    }

    // ==================== Recipe directions ====================

    /// 레시피의 조리 단계 목록.
    pub async fn list_directions(&self, recipe_id: Id) -> ServiceResult<Vec<RecipeDirection>> {
        self.require_recipe(recipe_id).await?;
        Ok(self.store.list_recipe_directions(recipe_id).await?)
    }

    /// 조리 단계 추가.
    pub async fn create_direction(
        &self,
        recipe_id: Id,
        actor_id: Id,
        mut request: RecipeDirectionRequest,
    ) -> ServiceResult<RecipeDirection> {
        normalize_and_validate(&mut request)?;
        self.guard()
            .check(recipe_id, actor_id)
            .await?
            .require_owned()?;

        Ok(self
            .store
            .create_recipe_direction(NewRecipeDirection {
                recipe_id,
                description: request.description,
            })
            .await?)
    }

    /// 조리 단계 수정.
    ///
    /// 조리 단계 조회는 소유권 확인 이후에만 수행합니다.
    pub async fn update_direction(
        &self,
        recipe_id: Id,
        direction_id: Id,
        actor_id: Id,
        mut request: RecipeDirectionRequest,
    ) -> ServiceResult<RecipeDirection> {
        let ownership = self.guard().check(recipe_id, actor_id).await?;
        if ownership == Ownership::Missing {
            return Err(ServiceError::item_not_found());
        }
        normalize_and_validate(&mut request)?;
        ownership.require_owned()?;

        let direction = self.store.get_recipe_direction(direction_id).await?;
        if !direction.is_some_and(|d| d.recipe_id == recipe_id) {
            return Err(ServiceError::item_not_found());
        }

        Ok(self
            .store
            .update_recipe_direction(direction_id, &request.description)
            .await?)
    }

    /// 조리 단계 삭제. 이미 없으면 성공.
    pub async fn delete_direction(
        &self,
        recipe_id: Id,
        direction_id: Id,
        actor_id: Id,
    ) -> ServiceResult<()> {
        self.guard()
            .check(recipe_id, actor_id)
            .await?
            .require_owned()?;

        let direction = self.store.get_recipe_direction(direction_id).await?;
        if direction.is_some_and(|d| d.recipe_id == recipe_id) {
            self.store.delete_recipe_direction(direction_id).await?;
            debug!(recipe_id, direction_id, "Recipe direction removed");
        }
        Ok(())
    }
}
