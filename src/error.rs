use crate::repository;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("remote store error: {0}")]
    Store(#[from] repository::Error),
}
