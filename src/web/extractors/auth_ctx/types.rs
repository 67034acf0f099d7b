/*
 * Responsibility
 * - The "authenticated request" context seen by handlers
 * - The authenticate middleware re-checks the session user against the store
 *   and inserts this into request extensions; handlers only ever see this type
 */

/// Present in request extensions only when the session's user exists and is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: i64,
}

impl AuthCtx {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}
