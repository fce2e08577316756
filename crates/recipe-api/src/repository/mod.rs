//! 데이터베이스 저장소.
//!
//! [`recipe_core::RecipeStore`]의 PostgreSQL 구현을 제공합니다.
//! 스키마는 `migrations/` 디렉토리의 SQL 마이그레이션으로 관리됩니다.

pub mod postgres;

pub use postgres::PgStore;
