//! 토큰 발급 및 검증.
//!
//! HS256 단일 알고리즘만 허용하며, 서명 검증 이후에 클레임 구조를 검사합니다.

use std::fmt;

use chrono::Duration;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};
use recipe_core::Id;
use secrecy::{ExposeSecret, SecretString};

use super::{ClaimError, Claims, Principal, Privileges};

/// 기본 토큰 유효 기간 (시간).
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 10;

// =============================================================================
// 에러 타입
// =============================================================================

/// 토큰 발급/초기화 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT 서명 키가 비어 있습니다")]
    EmptySecret,
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// 토큰 거부 사유.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenRejection {
    #[error(transparent)]
    Claims(#[from] ClaimError),
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token algorithm is not allowed")]
    DisallowedAlgorithm,
    #[error("token is malformed")]
    Malformed,
}

/// 인증 실패.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(TokenRejection),
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => {
                TokenRejection::Claims(ClaimError::ExpiredOrMalformed)
            }
            JwtErrorKind::InvalidSignature => TokenRejection::BadSignature,
            JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                TokenRejection::DisallowedAlgorithm
            }
            _ => TokenRejection::Malformed,
        }
    }
}

// =============================================================================
// TokenService
// =============================================================================

/// 서명 토큰 발급/검증 서비스.
///
/// 프로세스 시작 시 한 번 생성되어 읽기 전용으로 공유됩니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 키는 출력하지 않음
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// 서명 키로 서비스 생성. 기본 유효 기간은 10시간입니다.
    pub fn new(secret: &SecretString) -> Result<Self, TokenError> {
        let secret = secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        })
    }

    /// 유효 기간 변경.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 토큰 발급.
    pub fn issue(&self, subject_id: Id, privileges: Privileges) -> Result<String, TokenError> {
        let claims = Claims::new(subject_id, privileges, self.ttl);
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// 토큰 검증.
    ///
    /// 서명·알고리즘을 먼저 확인하고, 통과한 경우에만 클레임 구조를 검사합니다.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.into()))?;

        data.claims
            .into_principal()
            .map_err(|e| AuthError::InvalidToken(e.into()))
    }
}
