use catalog_types::ValidationError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    EntityValidation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    RelatedAggregate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] garde::Report),

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(#[source] catalog_dal::Error),
}

impl From<catalog_dal::Error> for Error {
    fn from(error: catalog_dal::Error) -> Self {
        match error {
            catalog_dal::Error::RecordNotFound(message) => Error::NotFound(message),
            catalog_dal::Error::Cancelled => Error::Cancelled,
            other => Error::Storage(other),
        }
    }
}
