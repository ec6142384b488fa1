use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    ///
    /// Read the stored bearer token.
    ///
    /// ### Returns
    /// None when no credential is currently stored
    ///
    async fn token(&self) -> Option<String>;
}
