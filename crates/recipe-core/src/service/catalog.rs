//! 공용 재료 사전 서비스.
//!
//! 재료 사전은 모든 사용자가 공유하며 소유권 검사가 없습니다.

use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Id, Ingredient};
use crate::requests::{normalize_and_validate, IngredientRequest};
use crate::store::RecipeStore;

/// 재료 사전 서비스.
#[derive(Clone)]
pub struct IngredientCatalog {
    store: Arc<dyn RecipeStore>,
}

impl IngredientCatalog {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Ingredient>> {
        Ok(self.store.list_ingredients().await?)
    }

    pub async fn create(&self, mut request: IngredientRequest) -> ServiceResult<Ingredient> {
        normalize_and_validate(&mut request)?;
        Ok(self.store.create_ingredient(&request.name).await?)
    }

    /// 재료 이름 수정. 없는 항목은 검증 에러입니다.
    pub async fn update(&self, id: Id, mut request: IngredientRequest) -> ServiceResult<Ingredient> {
        normalize_and_validate(&mut request)?;
        if self.store.get_ingredient(id).await?.is_none() {
            return Err(ServiceError::item_not_found());
        }
        Ok(self.store.update_ingredient(id, &request.name).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_create_and_update() {
        let catalog = IngredientCatalog::new(Arc::new(MemoryStore::new()));

        let salt = catalog
            .create(IngredientRequest {
                name: "  salt ".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(salt.name, "salt");

        let renamed = catalog
            .update(
                salt.id,
                IngredientRequest {
                    name: "sea salt".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "sea salt");
        assert_eq!(catalog.list().await.unwrap(), vec![renamed]);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let catalog = IngredientCatalog::new(Arc::new(MemoryStore::new()));
        let err = catalog
            .update(
                7,
                IngredientRequest {
                    name: "pepper".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
