//! In-memory stores used by the router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::{Snippet, SnippetStore, User, UserStore};
use crate::services::password;

#[derive(Default)]
pub struct MemorySnippetStore {
    rows: Mutex<Vec<Snippet>>,
}

impl MemorySnippetStore {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SnippetStore for MemorySnippetStore {
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> RepoResult<i64> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        let created = Utc::now();
        rows.push(Snippet {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created,
            expires: created + Duration::days(expires_days.into()),
        });
        Ok(id)
    }

    async fn get(&self, id: i64) -> RepoResult<Snippet> {
        let now = Utc::now();
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id && s.expires > now)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn latest(&self) -> RepoResult<Vec<Snippet>> {
        let now = Utc::now();
        let mut rows: Vec<Snippet> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.expires > now)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        rows.truncate(10);
        Ok(rows)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
    fail_lookups: Mutex<bool>,
}

impl MemoryUserStore {
    pub fn deactivate(&self, id: i64) {
        if let Some(user) = self.rows.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.active = false;
        }
    }

    pub fn delete(&self, id: i64) {
        self.rows.lock().unwrap().retain(|u| u.id != id);
    }

    /// Makes every subsequent `get` fail with a backend error.
    pub fn break_lookups(&self) {
        *self.fail_lookups.lock().unwrap() = true;
    }

    pub fn id_for(&self, email: &str) -> Option<i64> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.id)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, name: &str, email: &str, password: &str) -> RepoResult<()> {
        let hashed_password = password::hash_password(password).await?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == email) {
            return Err(RepoError::DuplicateEmail);
        }
        let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        rows.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            hashed_password,
            created: Utc::now(),
            active: true,
        });
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> RepoResult<i64> {
        let found = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && u.active)
            .map(|u| (u.id, u.hashed_password.clone()));

        let Some((id, hash)) = found else {
            password::verify_unknown_account(password).await;
            return Err(RepoError::InvalidCredentials);
        };

        if password::verify_password(password, &hash).await? {
            Ok(id)
        } else {
            Err(RepoError::InvalidCredentials)
        }
    }

    async fn get(&self, id: i64) -> RepoResult<User> {
        if *self.fail_lookups.lock().unwrap() {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn authenticate_returns_id_only_for_matching_active_user() {
        let users = MemoryUserStore::default();
        users
            .insert("Alice", "alice@example.com", "correct horse")
            .await
            .unwrap();

        let id = users
            .authenticate("alice@example.com", "correct horse")
            .await
            .unwrap();
        assert!(id > 0);

        assert!(matches!(
            users.authenticate("alice@example.com", "wrong password").await,
            Err(RepoError::InvalidCredentials)
        ));
        assert!(matches!(
            users.authenticate("nobody@example.com", "correct horse").await,
            Err(RepoError::InvalidCredentials)
        ));

        users.deactivate(id);
        assert!(matches!(
            users.authenticate("alice@example.com", "correct horse").await,
            Err(RepoError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let users = MemoryUserStore::default();
        users.insert("Bob", "bob@example.com", "longenough1").await.unwrap();
        assert!(matches!(
            users.insert("Bobby", "bob@example.com", "longenough2").await,
            Err(RepoError::DuplicateEmail)
        ));
    }

    #[tokio::test]
    async fn snippets_latest_is_newest_first() {
        let snippets = MemorySnippetStore::default();
        for title in ["one", "two", "three"] {
            snippets.insert(title, "body", 7).await.unwrap();
        }

        let titles: Vec<String> = snippets
            .latest()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, ["three", "two", "one"]);
        assert!(matches!(snippets.get(42).await, Err(RepoError::NotFound)));
    }
}
