//! 권한(capability) 집합.
//!
//! 토큰에는 `이름 → 활성화 여부` 맵으로 저장됩니다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 모든 가입 사용자에게 부여되는 기본 권한.
pub const REGULAR_USER_PRIVILEGE: &str = "regular";

/// 권한 집합.
///
/// 명시적인 `false` 항목도 표현할 수 있지만, 평가 시에는
/// 항목이 없는 것과 동일하게 "권한 없음"으로 취급합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Privileges(BTreeMap<String, bool>);

impl Privileges {
    /// 빈 권한 집합.
    pub fn none() -> Self {
        Self::default()
    }

    /// 가입 사용자 기본 권한 (`{"regular": true}`).
    pub fn default_user() -> Self {
        Self::none().with(REGULAR_USER_PRIVILEGE, true)
    }

    /// 항목 추가 (빌더).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.0.insert(name.into(), enabled);
        self
    }

    /// 항목이 존재하고 값이 `true`인 경우에만 참.
    pub fn has(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Privileges {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
