use super::CredentialStore;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProbe: Send + Sync {
    ///
    /// Check whether a session credential is currently stored.
    ///
    async fn is_authenticated(&self) -> bool;
}

///
/// Having a stored token is what "authenticated" means to this crate,
/// so every credential store doubles as an auth probe.
///
#[async_trait]
impl<T: CredentialStore + ?Sized> AuthProbe for T {
    async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }
}
