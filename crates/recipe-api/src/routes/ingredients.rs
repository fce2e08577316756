//! 공용 재료 사전 API 라우트.
//!
//! 모든 인증 사용자가 공유하며 소유권 검사가 없습니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use recipe_core::{Id, Ingredient, IngredientRequest};

use crate::error::{ApiJson, ApiResult, ItemResponse, ListResponse};
use crate::state::AppState;

/// GET /v1/ingredients
async fn list_ingredients(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListResponse<Ingredient>>> {
    Ok(ListResponse::json(state.catalog.list().await?))
}

/// POST /v1/ingredients
async fn create_ingredient(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<IngredientRequest>,
) -> ApiResult<Json<ItemResponse<Ingredient>>> {
    Ok(ItemResponse::json(state.catalog.create(request).await?))
}

/// PUT /v1/ingredients/{id}
async fn update_ingredient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Id>,
    ApiJson(request): ApiJson<IngredientRequest>,
) -> ApiResult<Json<ItemResponse<Ingredient>>> {
    Ok(ItemResponse::json(state.catalog.update(id, request).await?))
}

/// 재료 사전 라우터 생성.
pub fn ingredients_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ingredients", get(list_ingredients).post(create_ingredient))
        .route("/ingredients/{id}", put(update_ingredient))
}
