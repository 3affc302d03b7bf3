use uuid::Uuid;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    RecordNotFound(String),

    #[error("Operation was cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn not_found(entity: &str, id: Uuid) -> Self {
        Error::RecordNotFound(format!("{entity} '{id}' not found."))
    }
}
