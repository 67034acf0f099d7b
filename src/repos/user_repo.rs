/*
 * Responsibility
 * - users persistence contract (UserStore) consumed by handlers and the auth middleware
 * - Postgres implementation over PgPool
 * - passwords are only ever stored as Argon2id hashes
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::services::password;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub created: DateTime<Utc>,
    pub active: bool,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `RepoError::DuplicateEmail` when the address is taken.
    async fn insert(&self, name: &str, email: &str, password: &str) -> RepoResult<()>;

    /// Returns the user id for an active account whose password matches.
    /// Unknown email, inactive account and wrong password all yield
    /// `RepoError::InvalidCredentials`.
    async fn authenticate(&self, email: &str, password: &str) -> RepoResult<i64>;

    async fn get(&self, id: i64) -> RepoResult<User>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct Credentials {
    id: i64,
    hashed_password: String,
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn insert(&self, name: &str, email: &str, password: &str) -> RepoResult<()> {
        let hashed = password::hash_password(password).await?;

        sqlx::query(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, NOW())
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(hashed)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> RepoResult<i64> {
        let creds = sqlx::query_as::<_, Credentials>(
            r#"
            SELECT id, hashed_password
            FROM users
            WHERE email = $1 AND active = TRUE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(creds) = creds else {
            password::verify_unknown_account(password).await;
            return Err(RepoError::InvalidCredentials);
        };

        if password::verify_password(password, &creds.hashed_password).await? {
            Ok(creds.id)
        } else {
            Err(RepoError::InvalidCredentials)
        }
    }

    async fn get(&self, id: i64) -> RepoResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, hashed_password, created, active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)
    }
}
