//! 회원 가입 및 로그인.

use std::sync::Arc;

use recipe_core::{
    normalize_and_validate, Id, RecipeStore, ServiceError, ServiceResult, SignInRequest,
    SignUpRequest, StoreError,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::auth::{hash_password, verify_password, Privileges, TokenService};

const CREDENTIALS_INVALID: &str = "credentials invalid";

/// 가입/로그인 성공 응답.
#[derive(Debug, Clone, Serialize)]
pub struct SessionGrant {
    pub id: Id,
    pub access_token: String,
}

/// 계정 서비스.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn RecipeStore>,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(store: Arc<dyn RecipeStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    fn grant(&self, id: Id) -> ServiceResult<SessionGrant> {
        let access_token = self
            .tokens
            .issue(id, Privileges::default_user())
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        Ok(SessionGrant { id, access_token })
    }

    /// 회원 가입.
    ///
    /// 중복 사용자 이름은 검증 에러입니다.
    pub async fn sign_up(&self, mut request: SignUpRequest) -> ServiceResult<SessionGrant> {
        normalize_and_validate(&mut request)?;

        let duplicate = || {
            ServiceError::Validation(format!(
                "profile with username `{}` is already registered",
                request.username
            ))
        };

        if self
            .store
            .find_profile_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(duplicate());
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::Internal(e.to_string()))?;

        let profile = match self
            .store
            .create_profile(&request.username, &password_hash)
            .await
        {
            Ok(profile) => profile,
            Err(StoreError::Conflict(_)) => return Err(duplicate()),
            Err(e) => return Err(e.into()),
        };

        info!(profile_id = profile.id, "Profile registered");
        self.grant(profile.id)
    }

    /// 로그인.
    ///
    /// 형식 오류, 없는 사용자, 비밀번호 불일치는 모두 같은 인증 실패로 응답합니다.
    pub async fn sign_in(&self, mut request: SignInRequest) -> ServiceResult<SessionGrant> {
        if let Err(e) = normalize_and_validate(&mut request) {
            debug!(error = %e, "Sign-in payload rejected");
            return Err(ServiceError::Unauthenticated(CREDENTIALS_INVALID.to_string()));
        }

        let Some(profile) = self
            .store
            .find_profile_by_username(&request.username)
            .await?
        else {
            return Err(ServiceError::Unauthenticated(CREDENTIALS_INVALID.to_string()));
        };

        let matches = verify_password(&request.password, &profile.password_hash)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if !matches {
            debug!(profile_id = profile.id, "Password mismatch");
            return Err(ServiceError::Unauthenticated(CREDENTIALS_INVALID.to_string()));
        }

        self.grant(profile.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::{ErrorKind, MemoryStore};
    use secrecy::SecretString;

    fn service() -> (AccountService, Arc<TokenService>) {
        let tokens = Arc::new(
            TokenService::new(&SecretString::from("account-secret".to_string())).unwrap(),
        );
        let store: Arc<dyn RecipeStore> = Arc::new(MemoryStore::new());
        (AccountService::new(store, tokens.clone()), tokens)
    }

    fn sign_up(username: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn sign_in(username: &str, password: &str) -> SignInRequest {
        SignInRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_issues_regular_token() {
        let (accounts, tokens) = service();
        let grant = accounts.sign_up(sign_up("  alice ", "secret1")).await.unwrap();

        assert!(grant.id > 0);
        let principal = tokens.verify(&grant.access_token).unwrap();
        assert_eq!(principal.subject_id, grant.id);
        assert!(principal.privileges.has("regular"));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let (accounts, _) = service();
        accounts.sign_up(sign_up("alice", "secret1")).await.unwrap();

        let err = accounts
            .sign_up(sign_up("alice", "secret2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("alice"));
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let (accounts, _) = service();
        let err = accounts.sign_up(sign_up("al", "secret1")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_sign_in() {
        let (accounts, _) = service();
        let registered = accounts.sign_up(sign_up("alice", "secret1")).await.unwrap();

        let grant = accounts.sign_in(sign_in("alice", "secret1")).await.unwrap();
        assert_eq!(grant.id, registered.id);
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_uniform() {
        let (accounts, _) = service();
        accounts.sign_up(sign_up("alice", "secret1")).await.unwrap();

        for request in [
            sign_in("alice", "wrong-password"),
            sign_in("bob", "secret1"),
            sign_in("a", "x"),
        ] {
            let err = accounts.sign_in(request).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthenticated);
            assert_eq!(err.to_string(), "인증 실패: credentials invalid");
        }
    }
}
