use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no credential stored")]
    MissingCredential,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),
}
