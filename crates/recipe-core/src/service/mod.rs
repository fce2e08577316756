//! 도메인 서비스.

mod catalog;
mod recipe;

pub use catalog::IngredientCatalog;
pub use recipe::RecipeService;
