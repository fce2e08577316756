//! Axum 인증/권한 미들웨어.
//!
//! 보호된 라우트는 두 단계를 거칩니다:
//!
//! 1. [`authenticate`]: `Authorization: Bearer <token>` 검증 후
//!    [`Principal`]을 요청 확장(extensions)에 저장 (실패 시 401)
//! 2. [`require_privilege`]: 저장된 Principal의 권한 확인 (실패 시 403)
//!
//! 핸들러는 [`AuthPrincipal`] 추출기로 Principal을 읽습니다.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};

use super::{AuthError, Principal, TokenService, REGULAR_USER_PRIVILEGE};
use crate::error::ApiErrorResponse;

/// 인증 거부 사유.
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("지원하지 않는 인증 방식")]
    InvalidScheme,
    #[error("유효하지 않은 토큰")]
    InvalidToken(#[source] AuthError),
    #[error("인증 정보가 없습니다")]
    MissingPrincipal,
    #[error("권한이 부족합니다")]
    InsufficientPrivilege,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthRejection::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            AuthRejection::InvalidAuthHeader => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_HEADER"),
            AuthRejection::InvalidScheme => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_SCHEME"),
            AuthRejection::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthRejection::MissingPrincipal => (StatusCode::UNAUTHORIZED, "MISSING_PRINCIPAL"),
            AuthRejection::InsufficientPrivilege => {
                (StatusCode::FORBIDDEN, "INSUFFICIENT_PRIVILEGE")
            }
        };

        (status, Json(ApiErrorResponse::new(code, self.to_string()))).into_response()
    }
}

/// `Authorization` 헤더에서 토큰 부분을 꺼냅니다.
///
/// 공백 하나로 나눈 결과가 정확히 두 조각이어야 하며 첫 조각은 `Bearer`여야 합니다.
fn bearer_token(parts: &Parts) -> Result<&str, AuthRejection> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingToken)?
        .to_str()
        .map_err(|_| AuthRejection::InvalidAuthHeader)?;

    let segments: Vec<&str> = header.split(' ').collect();
    let [scheme, token] = segments.as_slice() else {
        return Err(AuthRejection::InvalidAuthHeader);
    };
    if *scheme != "Bearer" {
        return Err(AuthRejection::InvalidScheme);
    }
    Ok(*token)
}

/// 토큰 인증 미들웨어.
///
/// ```rust,ignore
/// Router::new()
///     .route("/recipes", get(list_recipes))
///     .route_layer(middleware::from_fn_with_state(tokens, authenticate));
/// ```
pub async fn authenticate(
    State(tokens): State<Arc<TokenService>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let (mut parts, body) = request.into_parts();

    let principal = match bearer_token(&parts).and_then(|token| {
        tokens.verify(token).map_err(AuthRejection::InvalidToken)
    }) {
        Ok(principal) => principal,
        Err(rejection) => {
            warn!(path = %parts.uri.path(), reason = ?rejection, "Request authentication failed");
            return Err(rejection);
        }
    };

    debug!(subject_id = principal.subject_id, "Request authenticated");
    parts.extensions.insert(principal);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

// ==================== Privilege gate ====================

/// 권한 게이트 설정.
#[derive(Debug, Clone)]
pub struct PrivilegeGate {
    required: &'static str,
}

impl PrivilegeGate {
    pub const fn new(required: &'static str) -> Self {
        Self { required }
    }

    /// 일반 사용자 권한 게이트.
    pub const fn regular() -> Self {
        Self::new(REGULAR_USER_PRIVILEGE)
    }

    pub fn required(&self) -> &'static str {
        self.required
    }

    fn check(&self, principal: Option<&Principal>) -> Result<(), AuthRejection> {
        let principal = principal.ok_or(AuthRejection::MissingPrincipal)?;
        if principal.privileges.has(self.required) {
            Ok(())
        } else {
            Err(AuthRejection::InsufficientPrivilege)
        }
    }
}

/// 권한 확인 미들웨어.
///
/// [`authenticate`] 뒤에서 실행되어야 합니다. Principal이 없으면 401입니다.
pub async fn require_privilege(
    State(gate): State<PrivilegeGate>,
    request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    if let Err(rejection) = gate.check(request.extensions().get::<Principal>()) {
        warn!(
            path = %request.uri().path(),
            required = gate.required,
            reason = ?rejection,
            "Privilege check failed"
        );
        return Err(rejection);
    }
    Ok(next.run(request).await)
}

// ==================== Extractor ====================

/// 인증된 Principal 추출기.
///
/// ```rust,ignore
/// async fn create_recipe(AuthPrincipal(principal): AuthPrincipal) -> impl IntoResponse {
///     format!("owner: {}", principal.subject_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthPrincipal)
            .ok_or(AuthRejection::MissingPrincipal)
    }
}
