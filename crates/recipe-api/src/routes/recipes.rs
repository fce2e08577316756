//! 레시피 API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /v1/recipes?category=` - 레시피 목록
//! - `POST /v1/recipes` - 레시피 생성 (요청자가 소유자)
//! - `PUT /v1/recipes/{id}` - 레시피 수정 (소유자만)
//! - `DELETE /v1/recipes/{id}` - 레시피 삭제 (소유자만, 없으면 성공)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use recipe_core::{Id, Recipe, RecipeRequest};
use serde::Deserialize;
use tracing::debug;

use crate::auth::AuthPrincipal;
use crate::error::{ApiJson, ApiResult, ItemResponse, ListResponse};
use crate::state::AppState;

/// 목록 조회 쿼리.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    pub category: Option<String>,
}

/// GET /v1/recipes
async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecipeListQuery>,
) -> ApiResult<Json<ListResponse<Recipe>>> {
    debug!(category = ?query.category, "Listing recipes");
    let recipes = state.recipes.list_recipes(query.category.as_deref()).await?;
    Ok(ListResponse::json(recipes))
}

/// POST /v1/recipes
async fn create_recipe(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    ApiJson(request): ApiJson<RecipeRequest>,
) -> ApiResult<Json<ItemResponse<Recipe>>> {
    let recipe = state
        .recipes
        .create_recipe(principal.subject_id, request)
        .await?;
    Ok(ItemResponse::json(recipe))
}

/// PUT /v1/recipes/{id}
async fn update_recipe(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<Id>,
    ApiJson(request): ApiJson<RecipeRequest>,
) -> ApiResult<Json<ItemResponse<Recipe>>> {
    let recipe = state
        .recipes
        .update_recipe(id, principal.subject_id, request)
        .await?;
    Ok(ItemResponse::json(recipe))
}

/// DELETE /v1/recipes/{id}
async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    state.recipes.delete_recipe(id, principal.subject_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 레시피 라우터 생성.
pub fn recipes_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/{id}", put(update_recipe).delete(delete_recipe))
}
