//! HTTP 경계 에러 처리.
//!
//! 서비스 계층 에러([`ServiceError`])를 분류([`ErrorKind`])에 따라
//! 상태 코드와 통합 에러 응답으로 변환합니다.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipe_core::{ErrorKind, ServiceError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// 통합 API 에러 응답.
///
/// ```json
/// {
///   "code": "NOT_PERMITTED",
///   "message": "권한 없음: user id mismatched",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_REQUEST", "NOT_PERMITTED")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    pub timestamp: i64,
}

impl ApiErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

// ==================== ApiError ====================

/// 핸들러 에러.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ServiceError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self.0.kind() {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", self.0.to_string()),
            ErrorKind::NotPermitted => (StatusCode::FORBIDDEN, "NOT_PERMITTED", self.0.to_string()),
            ErrorKind::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                self.0.to_string(),
            ),
            ErrorKind::Internal => {
                // 내부 원인은 로그에만 남김
                error!(error = %self.0, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiErrorResponse::new(code, message))).into_response()
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON 본문 추출기.
///
/// 파싱 실패를 통합 에러 응답(400)으로 변환합니다.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

// ==================== 응답 래퍼 ====================

/// 단건 응답 (`{"item": ...}`).
#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub item: T,
}

/// 목록 응답 (`{"list": [...]}`).
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub list: Vec<T>,
}

impl<T> ItemResponse<T> {
    pub fn json(item: T) -> Json<Self> {
        Json(Self { item })
    }
}

impl<T> ListResponse<T> {
    pub fn json(list: Vec<T>) -> Json<Self> {
        Json(Self { list })
    }
}
