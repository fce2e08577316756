//! 요청 페이로드 및 필드 검증.
//!
//! 문자열 필드는 검증 전에 앞뒤 공백이 제거됩니다 ([`Normalize`]).

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::ServiceError;
use crate::models::Id;

/// 검증 전 정규화.
pub trait Normalize {
    /// 문자열 필드의 앞뒤 공백 제거.
    fn trim_spaces(&mut self);
}

/// 페이로드를 정규화한 뒤 검증합니다.
///
/// 실패 시 필드별 메시지를 합쳐 [`ServiceError::Validation`]으로 반환합니다.
pub fn normalize_and_validate<T>(payload: &mut T) -> Result<(), ServiceError>
where
    T: Normalize + Validate,
{
    payload.trim_spaces();
    payload
        .validate()
        .map_err(|errors| ServiceError::Validation(describe_errors(&errors)))
}

fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| format!("{}: {}", field, m))
                    .unwrap_or_else(|| format!("{}: {}", field, e.code))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

// ================================================================================================
// Accounts
// ================================================================================================

/// 회원 가입 요청.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 255, message = "password must be 6-255 characters"))]
    pub password: String,
}

impl Normalize for SignUpRequest {
    fn trim_spaces(&mut self) {
        trim_in_place(&mut self.username);
    }
}

/// 로그인 요청.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 255, message = "password must be 6-255 characters"))]
    pub password: String,
}

impl Normalize for SignInRequest {
    fn trim_spaces(&mut self) {
        trim_in_place(&mut self.username);
    }
}

// ================================================================================================
// Recipes
// ================================================================================================

/// 레시피 생성/수정 요청.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(length(min = 3, max = 255))]
    pub name: String,
    #[validate(length(min = 3, max = 255))]
    pub description: String,
    #[validate(length(min = 3, max = 255))]
    pub category: String,
    #[validate(range(min = 1, message = "cooking_time must be at least 1"))]
    pub cooking_time: i32,
}

impl Normalize for RecipeRequest {
    fn trim_spaces(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.category);
    }
}

/// 레시피 재료 연결 생성 요청.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecipeIngredientRequest {
    #[validate(length(min = 3, max = 255))]
    pub quantity: String,
    #[validate(range(min = 1, message = "ingredient_id must be positive"))]
    pub ingredient_id: Id,
}

impl Normalize for CreateRecipeIngredientRequest {
    fn trim_spaces(&mut self) {
        trim_in_place(&mut self.quantity);
    }
}

/// 레시피 재료 연결 수정 요청 (수량만 변경 가능).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRecipeIngredientRequest {
    #[validate(length(min = 3, max = 255))]
    pub quantity: String,
}

impl Normalize for UpdateRecipeIngredientRequest {
    fn trim_spaces(&mut self) {
        trim_in_place(&mut self.quantity);
    }
}

/// 조리 단계 생성/수정 요청.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeDirectionRequest {
    #[validate(length(min = 3, max = 255))]
    pub description: String,
}

impl Normalize for RecipeDirectionRequest {
    fn trim_spaces(&mut self) {
        trim_in_place(&mut self.description);
    }
}

/// 재료 사전 생성/수정 요청.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientRequest {
    #[validate(length(min = 3, max = 255))]
    pub name: String,
}

impl Normalize for IngredientRequest {
    fn trim_spaces(&mut self) {
        trim_in_place(&mut self.name);
    }
}
