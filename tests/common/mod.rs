use async_trait::async_trait;
use lunara_notifications::{
    dto::{input, output},
    repository::{self, NotificationsRepository},
    CredentialStore,
};
use reqwest::StatusCode;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex, Once,
};
use tracing::level_filters::LevelFilter;

static INIT_TRACING_ONCE: Once = Once::new();

pub fn init_test_tracing() {
    INIT_TRACING_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(LevelFilter::DEBUG)
            .with_target(false)
            .with_test_writer()
            .init();
    });
}

pub fn notification(id: &str, is_read: bool) -> input::Notification {
    input::Notification {
        id: id.to_string(),
        title: format!("title {id}"),
        description: format!("description {id}"),
        time: "2h ago".to_string(),
        is_read,
        icon: "heart-outline".to_string(),
    }
}

///
/// In-memory credential store. Token presence drives the
/// authenticated/anonymous decision of the service under test.
///
pub struct FakeCredentialStore {
    token: Mutex<Option<String>>,
}

impl FakeCredentialStore {
    pub fn new(token: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            token: Mutex::new(token.map(str::to_string)),
        })
    }
}

#[async_trait]
impl CredentialStore for FakeCredentialStore {
    async fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

///
/// In-memory stand-in for the backend notification store.
/// Keeps a mutable list, counts calls, and can be switched into a
/// failure mode where every operation returns a server error.
///
pub struct FakeNotificationsRepository {
    notifications: Mutex<Vec<input::Notification>>,
    failing: AtomicBool,
    pub find_all_calls: AtomicUsize,
    pub unread_count_calls: AtomicUsize,
    pub delete_all_calls: AtomicUsize,
}

impl FakeNotificationsRepository {
    pub fn new(notifications: Vec<input::Notification>) -> Arc<Self> {
        Arc::new(Self {
            notifications: Mutex::new(notifications),
            failing: AtomicBool::new(false),
            find_all_calls: AtomicUsize::new(0),
            unread_count_calls: AtomicUsize::new(0),
            delete_all_calls: AtomicUsize::new(0),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn push(&self, notification: input::Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    fn fail_if_requested(&self) -> Result<(), repository::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(repository::Error::Status(
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationsRepository for FakeNotificationsRepository {
    async fn find_all(&self) -> Result<Vec<input::Notification>, repository::Error> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_requested()?;

        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn unread_count(&self) -> Result<usize, repository::Error> {
        self.unread_count_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_requested()?;

        let unread_count = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|notification| !notification.is_read)
            .count();

        Ok(unread_count)
    }

    async fn create_self(
        &self,
        notification: output::CreateSelfNotification,
    ) -> Result<input::Notification, repository::Error> {
        self.fail_if_requested()?;

        let created = input::Notification {
            id: format!("self-{}", self.notifications.lock().unwrap().len() + 1),
            title: notification.title,
            description: notification.description,
            time: "Just now".to_string(),
            is_read: false,
            icon: notification.icon.unwrap_or_else(|| "heart-outline".to_string()),
        };
        self.notifications.lock().unwrap().push(created.clone());

        Ok(created)
    }

    async fn mark_read(&self, id: &str) -> Result<(), repository::Error> {
        self.fail_if_requested()?;

        let mut notifications = self.notifications.lock().unwrap();
        if let Some(notification) = notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        {
            notification.is_read = true;
        }

        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), repository::Error> {
        self.fail_if_requested()?;

        for notification in self.notifications.lock().unwrap().iter_mut() {
            notification.is_read = true;
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), repository::Error> {
        self.fail_if_requested()?;

        self.notifications
            .lock()
            .unwrap()
            .retain(|notification| notification.id != id);

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), repository::Error> {
        self.delete_all_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_requested()?;

        self.notifications.lock().unwrap().clear();

        Ok(())
    }
}
