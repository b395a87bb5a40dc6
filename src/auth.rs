use async_trait::async_trait;

use crate::error::{JobBoardError, Result};

/// Opaque bearer credential issued by the external identity provider.
///
/// The store never obtains or refreshes tokens itself; callers pass one into
/// every action that touches user data.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Something that can hand out an access token for the signed-in user.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken>;
}

/// A token fixed up front, e.g. from a command-line flag or environment variable.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<AccessToken>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token
                .filter(|t| !t.trim().is_empty())
                .map(AccessToken::new),
        }
    }
}

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn access_token(&self) -> Result<AccessToken> {
        self.token.clone().ok_or(JobBoardError::MissingCredentials)
    }
}
