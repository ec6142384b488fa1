use super::{Error, NotificationsRepository, NotificationsRepositoryConfig};
use crate::{
    auth::CredentialStore,
    dto::{input, output},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::Arc;

///
/// [NotificationsRepository] backed by the backend's REST API.
///
/// Every call reads the bearer token from the credential store first;
/// no request is issued when no credential is stored.
/// No explicit timeout is set, transport defaults apply.
///
pub struct NotificationsRepositoryImpl {
    config: NotificationsRepositoryConfig,
    client: Client,
    credential_store: Arc<dyn CredentialStore>,
}

impl NotificationsRepositoryImpl {
    pub fn new(
        config: NotificationsRepositoryConfig,
        credential_store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            config,
            client: Client::new(),
            credential_store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    async fn token(&self) -> Result<String, Error> {
        self.credential_store
            .token()
            .await
            .ok_or(Error::MissingCredential)
    }

    fn ensure_success(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        Ok(response)
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<input::Notification>, Error> {
        let token = self.token().await?;

        let response = self
            .client
            .get(self.url("/api/notifications"))
            .bearer_auth(token)
            .send()
            .await?;
        let response = Self::ensure_success(response)?;

        let notifications = response.json().await?;

        Ok(notifications)
    }

    async fn unread_count(&self) -> Result<usize, Error> {
        let token = self.token().await?;

        let response = self
            .client
            .get(self.url("/api/notifications/unread"))
            .bearer_auth(token)
            .send()
            .await?;
        let response = Self::ensure_success(response)?;

        let unread_count: input::UnreadCount = response.json().await?;

        Ok(unread_count.unread_count)
    }

    async fn create_self(
        &self,
        notification: output::CreateSelfNotification,
    ) -> Result<input::Notification, Error> {
        let token = self.token().await?;

        let response = self
            .client
            .post(self.url("/api/notifications/self"))
            .bearer_auth(token)
            .json(&notification)
            .send()
            .await?;
        let response = Self::ensure_success(response)?;

        let notification = response.json().await?;

        Ok(notification)
    }

    async fn mark_read(&self, id: &str) -> Result<(), Error> {
        let token = self.token().await?;

        let response = self
            .client
            .put(self.url(&format!("/api/notifications/{id}/read")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::ensure_success(response)?;

        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), Error> {
        let token = self.token().await?;

        let response = self
            .client
            .put(self.url("/api/notifications/read-all"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::ensure_success(response)?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        let token = self.token().await?;

        let response = self
            .client
            .delete(self.url(&format!("/api/notifications/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::ensure_success(response)?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), Error> {
        let token = self.token().await?;

        let response = self
            .client
            .delete(self.url("/api/notifications"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::ensure_success(response)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::MockCredentialStore;

    #[tokio::test]
    async fn find_all_missing_credential() {
        let mut credential_store = MockCredentialStore::new();
        credential_store.expect_token().returning(|| None);
        let repository = NotificationsRepositoryImpl::new(
            NotificationsRepositoryConfig {
                api_url: "http://localhost:0".to_string(),
            },
            Arc::new(credential_store),
        );

        let result = repository.find_all().await;

        assert!(matches!(result, Err(Error::MissingCredential)));
    }

    #[tokio::test]
    async fn unread_count_missing_credential() {
        let mut credential_store = MockCredentialStore::new();
        credential_store.expect_token().returning(|| None);
        let repository = NotificationsRepositoryImpl::new(
            NotificationsRepositoryConfig {
                api_url: "http://localhost:0".to_string(),
            },
            Arc::new(credential_store),
        );

        let result = repository.unread_count().await;

        assert!(matches!(result, Err(Error::MissingCredential)));
    }
}
