/*
 * Responsibility
 * - The meaning a repo reports upwards (not found, duplicate email, bad credentials)
 * - Everything else stays an opaque backend error
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("no matching record found")]
    NotFound,
    #[error("duplicate email")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("password hash error: {0}")]
    PasswordHash(String),
}

const UNIQUE_VIOLATION: &str = "23505";

impl RepoError {
    /// Maps a unique violation on the users email constraint to `DuplicateEmail`.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some(UNIQUE_VIOLATION)
            && dbe.constraint() == Some("users_uc_email")
        {
            return RepoError::DuplicateEmail;
        }
        RepoError::Db(e)
    }
}
