//! 인메모리 저장소.
//!
//! 개발 환경과 테스트에서 사용합니다. 모든 테이블은 하나의 `RwLock`으로 보호됩니다.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::RecipeStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Id, Ingredient, NewRecipe, NewRecipeDirection, NewRecipeIngredient, Profile, Recipe,
    RecipeChanges, RecipeDirection, RecipeIngredient,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: Id,
    profiles: BTreeMap<Id, Profile>,
    recipes: BTreeMap<Id, Recipe>,
    recipe_ingredients: BTreeMap<Id, RecipeIngredient>,
    recipe_directions: BTreeMap<Id, RecipeDirection>,
    ingredients: BTreeMap<Id, Ingredient>,
}

impl Tables {
    fn allocate_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}

/// 인메모리 [`RecipeStore`] 구현.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn find_profile_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn create_profile(&self, username: &str, password_hash: &str) -> StoreResult<Profile> {
        let mut tables = self.tables.write().await;
        if tables.profiles.values().any(|p| p.username == username) {
            return Err(StoreError::Conflict(format!("username `{}`", username)));
        }

        let profile = Profile {
            id: tables.allocate_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn list_recipes(&self, category: Option<&str>) -> StoreResult<Vec<Recipe>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recipes
            .values()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, id: Id) -> StoreResult<Option<Recipe>> {
        Ok(self.tables.read().await.recipes.get(&id).cloned())
    }

    async fn create_recipe(&self, recipe: NewRecipe) -> StoreResult<Recipe> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let record = Recipe {
            id: tables.allocate_id(),
            name: recipe.name,
            description: recipe.description,
            category: recipe.category,
            cooking_time: recipe.cooking_time,
            owner_id: recipe.owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.recipes.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_recipe(&self, id: Id, changes: RecipeChanges) -> StoreResult<Recipe> {
        let mut tables = self.tables.write().await;
        let record = tables.recipes.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "recipe",
            id,
        })?;

        record.name = changes.name;
        record.description = changes.description;
        record.category = changes.category;
        record.cooking_time = changes.cooking_time;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_recipe(&self, id: Id) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.recipes.remove(&id).is_some();
        if removed {
            tables.recipe_ingredients.retain(|_, link| link.recipe_id != id);
            tables.recipe_directions.retain(|_, step| step.recipe_id != id);
        }
        Ok(removed)
    }

    async fn list_recipe_ingredients(&self, recipe_id: Id) -> StoreResult<Vec<RecipeIngredient>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recipe_ingredients
            .values()
            .filter(|link| link.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn get_recipe_ingredient(&self, id: Id) -> StoreResult<Option<RecipeIngredient>> {
        Ok(self.tables.read().await.recipe_ingredients.get(&id).cloned())
    }

    async fn create_recipe_ingredient(
        &self,
        link: NewRecipeIngredient,
    ) -> StoreResult<RecipeIngredient> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let record = RecipeIngredient {
            id: tables.allocate_id(),
            quantity: link.quantity,
            recipe_id: link.recipe_id,
            ingredient_id: link.ingredient_id,
            created_at: now,
            updated_at: now,
        };
        tables.recipe_ingredients.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_recipe_ingredient(
        &self,
        id: Id,
        quantity: &str,
    ) -> StoreResult<RecipeIngredient> {
        let mut tables = self.tables.write().await;
        let record = tables
            .recipe_ingredients
            .get_mut(&id)
            .ok_or(StoreError::NotFound {
                entity: "recipe ingredient",
                id,
            })?;

        record.quantity = quantity.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_recipe_ingredient(&self, id: Id) -> StoreResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .recipe_ingredients
            .remove(&id)
            .is_some())
    }

    async fn list_recipe_directions(&self, recipe_id: Id) -> StoreResult<Vec<RecipeDirection>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recipe_directions
            .values()
            .filter(|step| step.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn get_recipe_direction(&self, id: Id) -> StoreResult<Option<RecipeDirection>> {
        Ok(self.tables.read().await.recipe_directions.get(&id).cloned())
    }

    async fn create_recipe_direction(
        &self,
        direction: NewRecipeDirection,
    ) -> StoreResult<RecipeDirection> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let record = RecipeDirection {
            id: tables.allocate_id(),
            recipe_id: direction.recipe_id,
            description: direction.description,
            created_at: now,
            updated_at: now,
        };
        tables.recipe_directions.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_recipe_direction(
        &self,
        id: Id,
        description: &str,
    ) -> StoreResult<RecipeDirection> {
        let mut tables = self.tables.write().await;
        let record = tables
            .recipe_directions
            .get_mut(&id)
            .ok_or(StoreError::NotFound {
                entity: "recipe direction",
                id,
            })?;

        record.description = description.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_recipe_direction(&self, id: Id) -> StoreResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .recipe_directions
            .remove(&id)
            .is_some())
    }

    async fn list_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        Ok(self.tables.read().await.ingredients.values().cloned().collect())
    }

    async fn get_ingredient(&self, id: Id) -> StoreResult<Option<Ingredient>> {
        Ok(self.tables.read().await.ingredients.get(&id).cloned())
    }

    async fn create_ingredient(&self, name: &str) -> StoreResult<Ingredient> {
        let mut tables = self.tables.write().await;
        let record = Ingredient {
            id: tables.allocate_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.ingredients.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_ingredient(&self, id: Id, name: &str) -> StoreResult<Ingredient> {
        let mut tables = self.tables.write().await;
        let record = tables.ingredients.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "ingredient",
            id,
        })?;

        record.name = name.to_string();
        Ok(record.clone())
    }
}
