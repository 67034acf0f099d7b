//! Request pipeline composition.
//!
//! Three fixed chains, built once when the router is assembled:
//!
//! - `standard`: every route, `/ping` and `/static` included.
//!   Outermost first: panic recovery -> request log -> security headers -> limits.
//! - `dynamic`: page routes. Session -> CSRF -> authenticate.
//! - `protected`: dynamic routes that need a logged-in user. Adds the access gate.
//!
//! `Router::layer` wraps what is already there, so the layer applied last runs first.

use axum::{Router, middleware::from_fn_with_state};
use tower::ServiceBuilder;
use tower_sessions::{SessionManagerLayer, SessionStore, service::PrivateCookie};

use crate::middleware::auth::{access, authenticate};
use crate::middleware::csrf::{self, CsrfConfig};
use crate::middleware::{http, security_headers};
use crate::state::AppState;

pub fn standard<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = http::limit(router);
    let router = security_headers::apply(router);
    let router = http::log_requests(router);
    http::recover_panics(router)
}

pub fn dynamic<Store>(
    router: Router<AppState>,
    state: &AppState,
    sessions: SessionManagerLayer<Store, PrivateCookie>,
) -> Router<AppState>
where
    Store: SessionStore + Clone,
{
    let csrf_config = CsrfConfig {
        secure: state.secure_cookies,
    };

    // ServiceBuilder lists layers outermost first.
    router.layer(
        ServiceBuilder::new()
            .layer(sessions)
            .layer(from_fn_with_state(csrf_config, csrf::protect))
            .layer(from_fn_with_state(state.clone(), authenticate)),
    )
}

pub fn protected<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    access::apply(router)
}
