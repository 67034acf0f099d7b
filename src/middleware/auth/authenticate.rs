//! Session user -> AuthCtx.
//!
//! Every request on the dynamic chain passes through here. The id stored at login
//! is not trusted on its own: the user is fetched again so that deleted or
//! deactivated accounts lose access on their next request.
//!
//! | session id | store lookup      | outcome                                  |
//! |------------|-------------------|------------------------------------------|
//! | absent     | -                 | continue anonymous                       |
//! | present    | NotFound          | drop id from session, continue anonymous |
//! | present    | other error       | 500 for this request                     |
//! | present    | found, inactive   | drop id from session, continue anonymous |
//! | present    | found, active     | insert AuthCtx, continue                 |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::session::{AUTHENTICATED_USER_ID, AppSession};
use crate::state::AppState;
use crate::web::extractors::auth_ctx::AuthCtx;

pub async fn authenticate(
    State(state): State<AppState>,
    session: AppSession,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user_id) = session.get_int(AUTHENTICATED_USER_ID).await? else {
        return Ok(next.run(req).await);
    };

    match state.users.get(user_id).await {
        Ok(user) if user.active => {
            req.extensions_mut().insert(AuthCtx::new(user.id));
        }
        Ok(_) => {
            tracing::info!(user_id, "session user is deactivated; clearing login");
            session.remove(AUTHENTICATED_USER_ID).await?;
        }
        Err(RepoError::NotFound) => {
            tracing::info!(user_id, "session user no longer exists; clearing login");
            session.remove(AUTHENTICATED_USER_ID).await?;
        }
        Err(e) => return Err(AppError::internal(e)),
    }

    Ok(next.run(req).await)
}
