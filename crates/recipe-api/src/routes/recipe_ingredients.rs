//! 레시피 재료 연결 API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /v1/recipes/{id}/ingredients` - 재료 목록
//! - `POST /v1/recipes/{id}/ingredients` - 재료 추가
//! - `PUT /v1/recipes/{id}/ingredients/{ingredient_id}` - 수량 수정
//! - `DELETE /v1/recipes/{id}/ingredients/{ingredient_id}` - 재료 제거
//!
//! 변경 작업은 상위 레시피 소유자만 가능합니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use recipe_core::{CreateRecipeIngredientRequest, Id, RecipeIngredient, UpdateRecipeIngredientRequest};

use crate::auth::AuthPrincipal;
use crate::error::{ApiJson, ApiResult, ItemResponse, ListResponse};
use crate::state::AppState;

/// GET /v1/recipes/{id}/ingredients
async fn list_ingredients(
    State(state): State<Arc<AppState>>,
    Path(recipe_id): Path<Id>,
) -> ApiResult<Json<ListResponse<RecipeIngredient>>> {
    Ok(ListResponse::json(
        state.recipes.list_ingredients(recipe_id).await?,
    ))
}

/// POST /v1/recipes/{id}/ingredients
async fn create_ingredient(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(recipe_id): Path<Id>,
    ApiJson(request): ApiJson<CreateRecipeIngredientRequest>,
) -> ApiResult<Json<ItemResponse<RecipeIngredient>>> {
    let link = state
        .recipes
        .create_ingredient(recipe_id, principal.subject_id, request)
        .await?;
    Ok(ItemResponse::json(link))
}

/// PUT /v1/recipes/{id}/ingredients/{ingredient_id}
async fn update_ingredient(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path((recipe_id, link_id)): Path<(Id, Id)>,
    ApiJson(request): ApiJson<UpdateRecipeIngredientRequest>,
) -> ApiResult<Json<ItemResponse<RecipeIngredient>>> {
    let link = state
        .recipes
        .update_ingredient(recipe_id, link_id, principal.subject_id, request)
        .await?;
    Ok(ItemResponse::json(link))
}

/// DELETE /v1/recipes/{id}/ingredients/{ingredient_id}
async fn delete_ingredient(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path((recipe_id, link_id)): Path<(Id, Id)>,
) -> ApiResult<StatusCode> {
    state
        .recipes
        .delete_ingredient(recipe_id, link_id, principal.subject_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 레시피 재료 라우터 생성.
pub fn recipe_ingredients_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/recipes/{id}/ingredients",
            get(list_ingredients).post(create_ingredient),
        )
        .route(
            "/recipes/{id}/ingredients/{ingredient_id}",
            put(update_ingredient).delete(delete_ingredient),
        )
}
