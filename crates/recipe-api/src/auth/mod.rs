//! 인증 및 권한 부여.
//!
//! HS256 서명 토큰 기반 인증과 권한(capability) 검사를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: 토큰 페이로드 (`{id, privileges, exp}`)
//! - [`Privileges`]: 권한 집합
//! - [`TokenService`]: 토큰 발급/검증
//! - [`authenticate`], [`require_privilege`]: Axum 미들웨어
//! - [`AuthPrincipal`]: 핸들러용 Principal 추출기
//! - 비밀번호 해싱 함수

mod claims;
mod middleware;
mod password;
mod privileges;
mod token;

pub use claims::{ClaimError, Claims, Principal};
pub use middleware::{authenticate, require_privilege, AuthPrincipal, AuthRejection, PrivilegeGate};
pub use password::{hash_password, verify_password, PasswordError};
pub use privileges::{Privileges, REGULAR_USER_PRIVILEGE};
pub use token::{AuthError, TokenError, TokenRejection, TokenService, DEFAULT_TOKEN_TTL_HOURS};
