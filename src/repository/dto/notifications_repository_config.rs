#[derive(Clone)]
pub struct NotificationsRepositoryConfig {
    /// Base URL of the backend, without trailing slash, e.g. `https://api.lunara.app`
    pub api_url: String,
}
