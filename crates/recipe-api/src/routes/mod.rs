//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크
//! - `/user` - 회원 가입/로그인 (인증 불필요)
//! - `/v1/recipes` - 레시피 및 하위 재료/조리 단계
//! - `/v1/ingredients` - 공용 재료 사전
//!
//! `/v1` 아래 모든 라우트는 토큰 인증과 `regular` 권한이 필요합니다.

pub mod health;
pub mod ingredients;
pub mod recipe_directions;
pub mod recipe_ingredients;
pub mod recipes;
pub mod user;

pub use health::{health_router, HealthResponse};
pub use ingredients::ingredients_router;
pub use recipe_directions::recipe_directions_router;
pub use recipe_ingredients::recipe_ingredients_router;
pub use recipes::{recipes_router, RecipeListQuery};
pub use user::user_router;

use std::sync::Arc;

use axum::{middleware, Router};

use crate::auth::{authenticate, require_privilege, PrivilegeGate};
use crate::state::AppState;

/// 보호된 `/v1` 라우터 생성.
///
/// route_layer는 나중에 추가한 것이 바깥쪽이므로 인증이 권한 확인보다 먼저 실행됩니다.
fn protected_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .merge(recipes_router())
        .merge(recipe_ingredients_router())
        .merge(recipe_directions_router())
        .merge(ingredients_router())
        .route_layer(middleware::from_fn_with_state(
            PrivilegeGate::regular(),
            require_privilege,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            authenticate,
        ))
}

/// 전체 API 라우터 생성.
pub fn create_api_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/user", user_router())
        .nest("/v1", protected_router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Privileges;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{
            header::{AUTHORIZATION, CONTENT_TYPE},
            Request, StatusCode,
        },
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        state: AppState,
    }

    impl TestApp {
        fn new() -> Self {
            let state = create_test_state();
            let router = create_api_router(&state).with_state(Arc::new(state.clone()));
            Self { router, state }
        }

        fn token_for(&self, subject_id: i64) -> String {
            self.state
                .tokens
                .issue(subject_id, Privileges::default_user())
                .unwrap()
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> Response {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
            }
            let body = match body {
                Some(json) => {
                    builder = builder.header(CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };
            self.router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap()
        }
    }

    async fn read_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn pancakes() -> Value {
        json!({
            "name": "Pancakes",
            "description": "Fluffy breakfast",
            "category": "breakfast",
            "cooking_time": 20
        })
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let app = TestApp::new();

        let response = app.send("GET", "/v1/recipes", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.send("GET", "/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_recipe_lifecycle() {
        let app = TestApp::new();
        let owner = app.token_for(3);

        let response = app
            .send("POST", "/v1/recipes", Some(&owner), Some(pancakes()))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = read_json(response).await;
        let id = created["item"]["id"].as_i64().unwrap();
        assert_eq!(created["item"]["user_id"], 3);

        let mut changes = pancakes();
        changes["cooking_time"] = json!(25);
        let response = app
            .send("PUT", &format!("/v1/recipes/{id}"), Some(&owner), Some(changes))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["item"]["cooking_time"], 25);

        let response = app
            .send("GET", "/v1/recipes?category=breakfast", Some(&owner), None)
            .await;
        assert_eq!(read_json(response).await["list"].as_array().unwrap().len(), 1);

        let response = app
            .send("DELETE", &format!("/v1/recipes/{id}"), Some(&owner), None)
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // 이미 없는 레시피 삭제도 성공
        let response = app
            .send("DELETE", &format!("/v1/recipes/{id}"), Some(&owner), None)
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_foreign_recipe_is_forbidden() {
        let app = TestApp::new();
        let owner = app.token_for(3);
        let stranger = app.token_for(5);

        let created = read_json(
            app.send("POST", "/v1/recipes", Some(&owner), Some(pancakes()))
                .await,
        )
        .await;
        let id = created["item"]["id"].as_i64().unwrap();

        let response = app
            .send("DELETE", &format!("/v1/recipes/{id}"), Some(&stranger), None)
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .send("PUT", &format!("/v1/recipes/{id}"), Some(&stranger), Some(pancakes()))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .send(
                "POST",
                &format!("/v1/recipes/{id}/directions"),
                Some(&stranger),
                Some(json!({ "description": "Mix everything" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // 없는 하위 항목이라도 소유자가 아니면 403
        let response = app
            .send(
                "PUT",
                &format!("/v1/recipes/{id}/directions/9999"),
                Some(&stranger),
                Some(json!({ "description": "Mix everything" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_update_missing_recipe_is_bad_request() {
        let app = TestApp::new();
        let owner = app.token_for(3);

        let response = app
            .send("PUT", "/v1/recipes/999", Some(&owner), Some(pancakes()))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_ingredient_links() {
        let app = TestApp::new();
        let owner = app.token_for(3);

        let flour = read_json(
            app.send(
                "POST",
                "/v1/ingredients",
                Some(&owner),
                Some(json!({ "name": "flour" })),
            )
            .await,
        )
        .await;
        let flour_id = flour["item"]["id"].as_i64().unwrap();

        let recipe = read_json(
            app.send("POST", "/v1/recipes", Some(&owner), Some(pancakes()))
                .await,
        )
        .await;
        let recipe_id = recipe["item"]["id"].as_i64().unwrap();

        let response = app
            .send(
                "POST",
                &format!("/v1/recipes/{recipe_id}/ingredients"),
                Some(&owner),
                Some(json!({ "quantity": "200 g", "ingredient_id": flour_id })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let link_id = read_json(response).await["item"]["id"].as_i64().unwrap();

        let response = app
            .send(
                "PUT",
                &format!("/v1/recipes/{recipe_id}/ingredients/{link_id}"),
                Some(&owner),
                Some(json!({ "quantity": "250 g" })),
            )
            .await;
        assert_eq!(read_json(response).await["item"]["quantity"], "250 g");

        let response = app
            .send(
                "GET",
                &format!("/v1/recipes/{recipe_id}/ingredients"),
                Some(&owner),
                None,
            )
            .await;
        assert_eq!(read_json(response).await["list"].as_array().unwrap().len(), 1);

        let response = app
            .send(
                "DELETE",
                &format!("/v1/recipes/{recipe_id}/ingredients/{link_id}"),
                Some(&owner),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_child_of_missing_recipe() {
        let app = TestApp::new();
        let owner = app.token_for(3);

        let response = app
            .send("DELETE", "/v1/recipes/999/directions/1", Some(&owner), None)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .send("GET", "/v1/recipes/999/ingredients", Some(&owner), None)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_path_id() {
        let app = TestApp::new();
        let owner = app.token_for(3);

        let response = app
            .send("DELETE", "/v1/recipes/abc", Some(&owner), None)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
