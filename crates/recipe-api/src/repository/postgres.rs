//! PostgreSQL 저장소.

use async_trait::async_trait;
use recipe_core::{
    Id, Ingredient, NewRecipe, NewRecipeDirection, NewRecipeIngredient, Profile, Recipe,
    RecipeChanges, RecipeDirection, RecipeIngredient, RecipeStore, StoreError, StoreResult,
};
use sqlx::PgPool;

/// sqlx 에러를 저장소 에러로 변환.
fn map_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.message().to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

fn not_found(entity: &'static str, id: Id) -> StoreError {
    StoreError::NotFound { entity, id }
}

/// PostgreSQL [`RecipeStore`] 구현.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecipeStore for PgStore {
    // ==================== Profiles ====================

    async fn find_profile_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn create_profile(&self, username: &str, password_hash: &str) -> StoreResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_err)
    }

    // ==================== Recipes ====================

    async fn list_recipes(&self, category: Option<&str>) -> StoreResult<Vec<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT * FROM recipes
            WHERE $1::TEXT IS NULL OR category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get_recipe(&self, id: Id) -> StoreResult<Option<Recipe>> {
        sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn create_recipe(&self, recipe: NewRecipe) -> StoreResult<Recipe> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (name, description, category, cooking_time, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&recipe.name)
        .bind(&recipe.description)
        .bind(&recipe.category)
        .bind(recipe.cooking_time)
        .bind(recipe.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn update_recipe(&self, id: Id, changes: RecipeChanges) -> StoreResult<Recipe> {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET name = $2, description = $3, category = $4, cooking_time = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.category)
        .bind(changes.cooking_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?
        .ok_or_else(|| not_found("recipe", id))
    }

    async fn delete_recipe(&self, id: Id) -> StoreResult<bool> {
        // 하위 재료/조리 단계는 ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== Recipe ingredients ====================

    async fn list_recipe_ingredients(&self, recipe_id: Id) -> StoreResult<Vec<RecipeIngredient>> {
        sqlx::query_as::<_, RecipeIngredient>(
            "SELECT * FROM recipe_ingredients WHERE recipe_id = $1 ORDER BY id",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get_recipe_ingredient(&self, id: Id) -> StoreResult<Option<RecipeIngredient>> {
        sqlx::query_as::<_, RecipeIngredient>("SELECT * FROM recipe_ingredients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn create_recipe_ingredient(
        &self,
        link: NewRecipeIngredient,
    ) -> StoreResult<RecipeIngredient> {
        sqlx::query_as::<_, RecipeIngredient>(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(link.recipe_id)
        .bind(link.ingredient_id)
        .bind(&link.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn update_recipe_ingredient(
        &self,
        id: Id,
        quantity: &str,
    ) -> StoreResult<RecipeIngredient> {
        sqlx::query_as::<_, RecipeIngredient>(
            r#"
            UPDATE recipe_ingredients
            SET quantity = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?
        .ok_or_else(|| not_found("recipe ingredient", id))
    }

    async fn delete_recipe_ingredient(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM recipe_ingredients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== Recipe directions ====================

    async fn list_recipe_directions(&self, recipe_id: Id) -> StoreResult<Vec<RecipeDirection>> {
        sqlx::query_as::<_, RecipeDirection>(
            "SELECT * FROM recipe_directions WHERE recipe_id = $1 ORDER BY id",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get_recipe_direction(&self, id: Id) -> StoreResult<Option<RecipeDirection>> {
        sqlx::query_as::<_, RecipeDirection>("SELECT * FROM recipe_directions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn create_recipe_direction(
        &self,
        direction: NewRecipeDirection,
    ) -> StoreResult<RecipeDirection> {
        sqlx::query_as::<_, RecipeDirection>(
            r#"
            INSERT INTO recipe_directions (recipe_id, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(direction.recipe_id)
        .bind(&direction.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn update_recipe_direction(
        &self,
        id: Id,
        description: &str,
    ) -> StoreResult<RecipeDirection> {
        sqlx::query_as::<_, RecipeDirection>(
            r#"
            UPDATE recipe_directions
            SET description = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?
        .ok_or_else(|| not_found("recipe direction", id))
    }

    async fn delete_recipe_direction(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM recipe_directions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== Ingredient dictionary ====================

    async fn list_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn get_ingredient(&self, id: Id) -> StoreResult<Option<Ingredient>> {
        sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn create_ingredient(&self, name: &str) -> StoreResult<Ingredient> {
        sqlx::query_as::<_, Ingredient>(
            "INSERT INTO ingredients (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn update_ingredient(&self, id: Id, name: &str) -> StoreResult<Ingredient> {
        sqlx::query_as::<_, Ingredient>(
            "UPDATE ingredients SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?
        .ok_or_else(|| not_found("ingredient", id))
    }
}
