//! 서비스 및 저장소 에러 타입.
//!
//! 서비스 계층에서 발생하는 에러는 [`ErrorKind`]로 분류되며,
//! HTTP 경계 계층은 이 분류만 보고 상태 코드를 결정합니다.

use thiserror::Error;

use crate::models::Id;

/// 저장소 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 갱신 대상 레코드가 존재하지 않음
    #[error("{entity} {id}을(를) 찾을 수 없습니다")]
    NotFound { entity: &'static str, id: Id },

    /// 유니크 제약 위반
    #[error("중복된 값: {0}")]
    Conflict(String),

    /// 백엔드(DB 드라이버 등) 에러
    #[error("저장소 에러: {0}")]
    Backend(String),
}

/// 저장소 작업 Result 타입.
pub type StoreResult<T> = Result<T, StoreError>;

/// 서비스 에러 분류.
///
/// 경계 계층에서 exhaustive match로 상태 코드에 매핑됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 요청 형식/필드 제약 위반, 참조 대상 없음
    Validation,
    /// 소유권 불일치
    NotPermitted,
    /// 자격증명 불일치
    Unauthenticated,
    /// 분류되지 않은 내부 에러
    Internal,
}

/// 서비스 계층 에러.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 검증 실패
    #[error("유효하지 않은 요청: {0}")]
    Validation(String),

    /// 다른 사용자의 리소스
    #[error("권한 없음: {0}")]
    NotPermitted(String),

    /// 잘못된 자격증명
    #[error("인증 실패: {0}")]
    Unauthenticated(String),

    /// 저장소 에러
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// 기타 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 서비스 작업 Result 타입.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// 조회 대상이 없을 때의 검증 에러.
    pub fn item_not_found() -> Self {
        ServiceError::Validation("item not found".to_string())
    }

    /// 소유자 불일치 에러.
    pub fn owner_mismatch() -> Self {
        ServiceError::NotPermitted("user id mismatched".to_string())
    }

    /// 에러 분류 반환.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotPermitted(_) => ErrorKind::NotPermitted,
            ServiceError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            ServiceError::Storage(StoreError::NotFound { .. } | StoreError::Conflict(_)) => {
                ErrorKind::Validation
            }
            ServiceError::Storage(_) | ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }
}
