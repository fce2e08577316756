//! JWT 페이로드 및 구조 검증.

use chrono::{DateTime, Duration, Utc};
use recipe_core::Id;
use serde::{Deserialize, Serialize};

use super::Privileges;

/// 클레임 구조 검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    #[error("token is expired or its time claims are malformed")]
    ExpiredOrMalformed,
    #[error("user id cannot be empty")]
    MissingSubject,
}

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID. 누락 시 0으로 역직렬화되어 검증에서 거부됩니다.
    #[serde(default)]
    pub id: Id,
    /// 사용자 권한
    #[serde(default)]
    pub privileges: Privileges,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued At (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// 현재 시각 기준으로 `ttl` 후 만료되는 클레임 생성.
    pub fn new(subject_id: Id, privileges: Privileges, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: subject_id,
            privileges,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// 구조 검증.
    ///
    /// 서명 검증 이후 [`TokenService::verify`](super::TokenService::verify)에서만 호출됩니다.
    pub(crate) fn validate(&self) -> Result<(), ClaimError> {
        if self.exp < Utc::now().timestamp() || self.exp < self.iat {
            return Err(ClaimError::ExpiredOrMalformed);
        }
        if self.id < 1 {
            return Err(ClaimError::MissingSubject);
        }
        Ok(())
    }

    /// 검증 후 [`Principal`]로 변환.
    pub(crate) fn into_principal(self) -> Result<Principal, ClaimError> {
        self.validate()?;
        let expires_at =
            DateTime::from_timestamp(self.exp, 0).ok_or(ClaimError::ExpiredOrMalformed)?;

        Ok(Principal {
            subject_id: self.id,
            privileges: self.privileges,
            expires_at,
        })
    }
}

/// 검증된 토큰에서 얻은 인증 주체.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject_id: Id,
    pub privileges: Privileges,
    pub expires_at: DateTime<Utc>,
}
