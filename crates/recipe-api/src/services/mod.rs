//! API 계층 서비스.
//!
//! 토큰 발급과 비밀번호 해싱이 필요한 계정 흐름을 제공합니다.

pub mod account;

pub use account::{AccountService, SessionGrant};
