//! 도메인 모델.
//!
//! 레시피의 하위 엔티티(재료 연결, 조리 단계)는 자체 소유자를 갖지 않으며,
//! 항상 부모 레시피의 `owner_id`로 권한을 판단합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 엔티티 식별자.
pub type Id = i64;

/// 사용자 프로필.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Profile {
    pub id: Id,
    pub username: String,
    /// Argon2 PHC 해시
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// 레시피.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Recipe {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub category: String,
    pub cooking_time: i32,
    /// 생성 시점의 사용자 ID. 이후 변경되지 않습니다.
    #[serde(rename = "user_id")]
    pub owner_id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 레시피에 연결된 재료와 수량.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct RecipeIngredient {
    pub id: Id,
    pub quantity: String,
    pub recipe_id: Id,
    pub ingredient_id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 레시피 조리 단계.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct RecipeDirection {
    pub id: Id,
    pub recipe_id: Id,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 공용 재료 사전 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub id: Id,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// 새 레시피 입력.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub category: String,
    pub cooking_time: i32,
    pub owner_id: Id,
}

/// 레시피 갱신 필드. 소유자는 포함하지 않습니다.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub name: String,
    pub description: String,
    pub category: String,
    pub cooking_time: i32,
}

/// 새 재료 연결 입력.
#[derive(Debug, Clone)]
pub struct NewRecipeIngredient {
    pub recipe_id: Id,
    pub ingredient_id: Id,
    pub quantity: String,
}

/// 새 조리 단계 입력.
#[derive(Debug, Clone)]
pub struct NewRecipeDirection {
    pub recipe_id: Id,
    pub description: String,
}
