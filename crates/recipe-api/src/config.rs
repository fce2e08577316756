//! API 서버 설정.
//!
//! 환경 변수(`.env` 포함)에서 로드합니다.
//!
//! | 변수 | 기본값 | 설명 |
//! |------|--------|------|
//! | `API_HOST` | `127.0.0.1` | 바인딩 주소 |
//! | `API_PORT` | `3000` | 바인딩 포트 |
//! | `JWT_KEY` | (필수) | 토큰 서명 키 |
//! | `JWT_TTL_HOURS` | `10` | 토큰 유효 기간 (1..=8760) |
//! | `DATABASE_URL` | (없음) | 없으면 인메모리 저장소 사용 |

use std::net::SocketAddr;

use secrecy::SecretString;
use serde::Deserialize;

use crate::auth::DEFAULT_TOKEN_TTL_HOURS;

/// 토큰 유효 기간 상한 (1년).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// API 서버 설정.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "api_host")]
    pub host: String,
    #[serde(rename = "api_port")]
    pub port: u16,
    /// 토큰 서명 키
    pub jwt_key: SecretString,
    pub jwt_ttl_hours: i64,
    /// PostgreSQL 연결 URL
    #[serde(default)]
    pub database_url: Option<String>,
}

impl ApiConfig {
    /// 환경 변수에서 설정을 로드합니다.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::Environment::default().try_parsing(true)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder
            .set_default("api_host", "127.0.0.1")?
            .set_default("api_port", 3000)?
            .set_default("jwt_ttl_hours", DEFAULT_TOKEN_TTL_HOURS)?
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, config::ConfigError> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.jwt_ttl_hours) {
            return Err(config::ConfigError::Message(format!(
                "JWT_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {}",
                self.jwt_ttl_hours
            )));
        }
        Ok(self)
    }

    /// 토큰 유효 기간. 로드 시 범위가 검증됩니다.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt_ttl_hours)
    }

    /// 바인딩 주소.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_builder(
            builder().set_override("jwt_key", "secret").unwrap(),
        )
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt_ttl_hours, 10);
        assert_eq!(config.jwt_key.expose_secret(), "secret");
        assert!(config.database_url.is_none());
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_builder(
            builder()
                .set_override("jwt_key", "secret")
                .unwrap()
                .set_override("api_host", "0.0.0.0")
                .unwrap()
                .set_override("api_port", 8080)
                .unwrap()
                .set_override("database_url", "postgres://localhost/recipes")
                .unwrap(),
        )
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/recipes")
        );
    }

    #[test]
    fn test_ttl_out_of_range() {
        for ttl in [0_i64, -5, MAX_TOKEN_TTL_HOURS + 1, i64::MAX] {
            let result = ApiConfig::from_builder(
                builder()
                    .set_override("jwt_key", "secret")
                    .unwrap()
                    .set_override("jwt_ttl_hours", ttl)
                    .unwrap(),
            );
            assert!(result.is_err(), "ttl {ttl}");
        }
    }

    #[test]
    fn test_ttl_in_range() {
        let config = ApiConfig::from_builder(
            builder()
                .set_override("jwt_key", "secret")
                .unwrap()
                .set_override("jwt_ttl_hours", 24)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(config.token_ttl(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_missing_jwt_key() {
        assert!(ApiConfig::from_builder(builder()).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ApiConfig::from_builder(
            builder().set_override("jwt_key", "very-private").unwrap(),
        )
        .unwrap();
        assert!(!format!("{config:?}").contains("very-private"));
    }
}
