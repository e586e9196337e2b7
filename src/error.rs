use thiserror::Error;

/// Failures raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    // built only through `from_sqlx`, so unique violations are never missed
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Classify an sqlx error, separating unique violations from other failures.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::ConstraintViolation(db.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("argon2 hash error: {0}")]
    Hash(String),

    #[error("argon2 parse hash error: {0}")]
    Parse(String),
}

/// Errors surfaced by the user repository.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("malformed record: {0}")]
    MalformedResult(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type RepoResult<T> = Result<T, RepoError>;
