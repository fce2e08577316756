//! 가입부터 보호된 리소스 접근까지의 인증 흐름 테스트.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    response::Response,
    Router,
};
use recipe_api::{create_api_router, AppState, Privileges, TokenService};
use recipe_core::MemoryStore;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

const JWT_KEY: &str = "integration-test-key";

fn app() -> (Router, Arc<TokenService>) {
    let tokens =
        Arc::new(TokenService::new(&SecretString::from(JWT_KEY.to_string())).unwrap());
    let state = AppState::new(tokens.clone(), Arc::new(MemoryStore::new()));
    let router = create_api_router(&state).with_state(Arc::new(state));
    (router, tokens)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn sign_up(app: &Router, username: &str) -> (i64, String) {
    let response = send(
        app,
        "POST",
        "/user/signUp",
        None,
        Some(json!({ "username": username, "password": "secret1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let id = body["id"].as_i64().unwrap();
    let token = body["access_token"].as_str().unwrap().to_string();
    assert!(id > 0);
    assert!(!token.is_empty());
    (id, format!("Bearer {token}"))
}

fn recipe() -> Value {
    json!({
        "name": "Tomato soup",
        "description": "Simple and warm",
        "category": "soup",
        "cooking_time": 30
    })
}

#[tokio::test]
async fn test_signed_up_user_owns_created_recipe() {
    let (app, _) = app();
    let (alice_id, alice) = sign_up(&app, "alice").await;
    let (_, bob) = sign_up(&app, "bob").await;

    let response = send(&app, "POST", "/v1/recipes", Some(&alice), Some(recipe())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = read_json(response).await;
    assert_eq!(created["item"]["user_id"], alice_id);
    let recipe_id = created["item"]["id"].as_i64().unwrap();

    // 다른 사용자의 삭제 시도
    let response = send(
        &app,
        "DELETE",
        &format!("/v1/recipes/{recipe_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(read_json(response).await["code"], "NOT_PERMITTED");

    // 소유자는 삭제 가능
    let response = send(
        &app,
        "DELETE",
        &format!("/v1/recipes/{recipe_id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_child_of_missing_recipe_is_bad_request() {
    let (app, _) = app();
    let (_, alice) = sign_up(&app, "alice").await;

    let response = send(
        &app,
        "DELETE",
        "/v1/recipes/4242/ingredients/1",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_authorization_headers() {
    let (app, _) = app();

    for header in [None, Some("Basic xyz"), Some("Bearer"), Some("Bearer garbage")] {
        let response = send(&app, "GET", "/v1/recipes", header, None).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "header: {header:?}"
        );
    }
}

#[tokio::test]
async fn test_token_signed_with_other_key() {
    let (app, _) = app();
    let foreign = TokenService::new(&SecretString::from("another-key".to_string())).unwrap();
    let token = foreign.issue(1, Privileges::default_user()).unwrap();

    let response = send(
        &app,
        "GET",
        "/v1/recipes",
        Some(&format!("Bearer {token}")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_without_privileges_is_forbidden() {
    let (app, tokens) = app();
    let token = tokens.issue(9, Privileges::none()).unwrap();

    let response = send(
        &app,
        "GET",
        "/v1/recipes",
        Some(&format!("Bearer {token}")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_sign_in_with_wrong_password() {
    let (app, _) = app();
    sign_up(&app, "alice").await;

    let response = send(
        &app,
        "POST",
        "/user/signIn",
        None,
        Some(json!({ "username": "alice", "password": "not-the-password" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(response).await["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_duplicate_sign_up_is_bad_request() {
    let (app, _) = app();
    sign_up(&app, "alice").await;

    let response = send(
        &app,
        "POST",
        "/user/signUp",
        None,
        Some(json!({ "username": "alice", "password": "secret1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
