//! 리소스 소유권 검사.
//!
//! 모든 변경 작업은 대상(또는 부모 레시피)의 소유자를 조회해
//! 인증된 사용자와 비교한 뒤 진행합니다.
//!
//! ```text
//! owner_of(id) ──► None            ─► Ownership::Missing
//!              ├─► Some(actor)     ─► Ownership::Owned
//!              └─► Some(other)     ─► Ownership::Foreign
//! ```
//!
//! `Missing`을 어떻게 처리할지는 호출하는 작업이 결정합니다.
//! 생성/수정은 검증 에러, 삭제는 성공(멱등)으로 취급합니다.

use async_trait::async_trait;

use crate::error::{ServiceError, ServiceResult, StoreResult};
use crate::models::Id;
use crate::store::RecipeStore;

/// 리소스 소유자 조회.
#[async_trait]
pub trait OwnerLookup: Send + Sync {
    /// 리소스의 소유자 ID. 리소스가 없으면 `None`.
    async fn owner_of(&self, resource_id: Id) -> StoreResult<Option<Id>>;
}

/// 레시피 소유자 조회 어댑터.
///
/// 재료 연결과 조리 단계도 이 조회를 통해 부모 레시피의 소유자로 판단합니다.
pub struct RecipeOwners<'a>(pub &'a dyn RecipeStore);

#[async_trait]
impl OwnerLookup for RecipeOwners<'_> {
    async fn owner_of(&self, resource_id: Id) -> StoreResult<Option<Id>> {
        Ok(self.0.get_recipe(resource_id).await?.map(|r| r.owner_id))
    }
}

/// 소유권 검사 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// 요청자가 소유자
    Owned,
    /// 리소스 없음
    Missing,
    /// 다른 사용자의 리소스
    Foreign { owner_id: Id },
}

impl Ownership {
    /// 소유자일 때만 통과. 없는 리소스는 검증 에러입니다.
    pub fn require_owned(self) -> ServiceResult<()> {
        match self {
            Ownership::Owned => Ok(()),
            Ownership::Missing => Err(ServiceError::item_not_found()),
            Ownership::Foreign { .. } => Err(ServiceError::owner_mismatch()),
        }
    }

    /// 삭제용 검사. 진행해야 하면 `true`, 이미 없으면 `false`.
    pub fn require_owned_or_absent(self) -> ServiceResult<bool> {
        match self {
            Ownership::Owned => Ok(true),
            Ownership::Missing => Ok(false),
            Ownership::Foreign { .. } => Err(ServiceError::owner_mismatch()),
        }
    }
}

/// 소유권 가드.
///
/// 조회 함수([`OwnerLookup`])로 매개변수화되어 모든 변경 작업에서 동일하게 사용됩니다.
pub struct OwnershipGuard<L> {
    lookup: L,
}

impl<L: OwnerLookup> OwnershipGuard<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// 리소스 소유권 판정.
    pub async fn check(&self, resource_id: Id, actor_id: Id) -> StoreResult<Ownership> {
        let ownership = match self.lookup.owner_of(resource_id).await? {
            None => Ownership::Missing,
            Some(owner_id) if owner_id == actor_id => Ownership::Owned,
            Some(owner_id) => Ownership::Foreign { owner_id },
        };

        if let Ownership::Foreign { owner_id } = ownership {
            tracing::debug!(resource_id, actor_id, owner_id, "Ownership mismatch");
        }
        Ok(ownership)
    }
}
