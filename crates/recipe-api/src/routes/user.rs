//! 계정 API 라우트.
//!
//! # 엔드포인트
//!
//! - `POST /user/signUp` - 회원 가입
//! - `POST /user/signIn` - 로그인
//!
//! 두 엔드포인트 모두 `{id, access_token}`을 반환하며 인증이 필요 없습니다.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use recipe_core::{SignInRequest, SignUpRequest};

use crate::error::{ApiJson, ApiResult};
use crate::services::SessionGrant;
use crate::state::AppState;

/// POST /user/signUp
async fn sign_up(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SignUpRequest>,
) -> ApiResult<Json<SessionGrant>> {
    Ok(Json(state.accounts.sign_up(request).await?))
}

/// POST /user/signIn
async fn sign_in(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SignInRequest>,
) -> ApiResult<Json<SessionGrant>> {
    Ok(Json(state.accounts.sign_in(request).await?))
}

/// 계정 라우터 생성.
pub fn user_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signUp", post(sign_up))
        .route("/signIn", post(sign_in))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let app = user_router().with_state(Arc::new(create_test_state()));
        let credentials = serde_json::json!({ "username": "alice", "password": "secret1" });

        let response = app
            .clone()
            .oneshot(post_json("/signUp", credentials.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let registered = read_json(response).await;
        assert!(registered["id"].as_i64().unwrap() > 0);
        assert!(!registered["access_token"].as_str().unwrap().is_empty());

        let response = app.oneshot(post_json("/signIn", credentials)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["id"], registered["id"]);
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user() {
        let app = user_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(post_json(
                "/signIn",
                serde_json::json!({ "username": "nobody", "password": "secret1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = user_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(post_json("/signUp", serde_json::json!({ "username": 5 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["code"], "INVALID_REQUEST");
    }
}
