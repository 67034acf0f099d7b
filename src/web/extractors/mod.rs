/*
 * Responsibility
 * - Request -> typed inputs for handlers
 *   - auth_ctx: authenticated user context placed by the authenticate middleware
 *   - form: urlencoded body -> forms::Form
 *   - page: session + csrf token + auth flag + renderer, for rendering views
 *   - snippet_id: path segment -> positive snippet id (404 otherwise)
 */
pub mod auth_ctx;
pub mod form;
pub mod page;
pub mod snippet_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use form::FormData;
pub use page::Page;
pub use snippet_id::SnippetId;
