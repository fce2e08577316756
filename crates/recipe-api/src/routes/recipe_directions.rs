//! 레시피 조리 단계 API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /v1/recipes/{id}/directions`
//! - `POST /v1/recipes/{id}/directions`
//! - `PUT /v1/recipes/{id}/directions/{direction_id}`
//! - `DELETE /v1/recipes/{id}/directions/{direction_id}`

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use recipe_core::{Id, RecipeDirection, RecipeDirectionRequest};

use crate::auth::AuthPrincipal;
use crate::error::{ApiJson, ApiResult, ItemResponse, ListResponse};
use crate::state::AppState;

async fn list_directions(
    State(state): State<Arc<AppState>>,
    Path(recipe_id): Path<Id>,
) -> ApiResult<Json<ListResponse<RecipeDirection>>> {
    Ok(ListResponse::json(
        state.recipes.list_directions(recipe_id).await?,
    ))
}

async fn create_direction(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(recipe_id): Path<Id>,
    ApiJson(request): ApiJson<RecipeDirectionRequest>,
) -> ApiResult<Json<ItemResponse<RecipeDirection>>> {
    let direction = state
        .recipes
        .create_direction(recipe_id, principal.subject_id, request)
        .await?;
    Ok(ItemResponse::json(direction))
}

async fn update_direction(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path((recipe_id, direction_id)): Path<(Id, Id)>,
    ApiJson(request): ApiJson<RecipeDirectionRequest>,
) -> ApiResult<Json<ItemResponse<RecipeDirection>>> {
    let direction = state
        .recipes
        .update_direction(recipe_id, direction_id, principal.subject_id, request)
        .await?;
    Ok(ItemResponse::json(direction))
}

async fn delete_direction(
    State(state): State<Arc<AppState>>,
    AuthPrincipal(principal): AuthPrincipal,
    Path((recipe_id, direction_id)): Path<(Id, Id)>,
) -> ApiResult<StatusCode> {
    state
        .recipes
        .delete_direction(recipe_id, direction_id, principal.subject_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 조리 단계 라우터 생성.
pub fn recipe_directions_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/recipes/{id}/directions",
            get(list_directions).post(create_direction),
        )
        .route(
            "/recipes/{id}/directions/{direction_id}",
            put(update_direction).delete(delete_direction),
        )
}
