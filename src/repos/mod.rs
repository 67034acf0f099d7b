/*
 * Responsibility
 * - Persistence contracts (SnippetStore / UserStore) and their implementations
 * - Handlers only see the traits; Postgres or in-memory is chosen at startup
 */
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod snippet_repo;
pub mod user_repo;

pub use snippet_repo::{PgSnippetRepo, Snippet, SnippetStore};
pub use user_repo::{PgUserRepo, User, UserStore};
