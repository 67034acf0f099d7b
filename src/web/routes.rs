/*
 * Responsibility
 * - URL structure of the site and which chain each route runs through
 *   - standard only: /ping, /static/...
 *   - dynamic (session, CSRF, authenticate): every page
 *   - protected (dynamic + login gate): create snippet, profile, logout
 */
use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_sessions::{SessionManagerLayer, SessionStore, service::PrivateCookie};

use crate::middleware::chain;
use crate::state::AppState;
use crate::web::handlers::{
    pages::{about, home, ping},
    snippets::{create_snippet, create_snippet_form, show_snippet},
    users::{login, login_form, logout, profile, signup, signup_form},
};

pub fn router<Store>(
    state: AppState,
    sessions: SessionManagerLayer<Store, PrivateCookie>,
    static_dir: impl AsRef<Path>,
) -> Router
where
    Store: SessionStore + Clone,
{
    let protected = chain::protected(
        Router::new()
            .route("/snippet/create", get(create_snippet_form).post(create_snippet))
            .route("/user/profile", get(profile))
            .route("/user/logout", post(logout)),
    );

    let dynamic = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/snippet/{id}", get(show_snippet))
        .route("/user/signup", get(signup_form).post(signup))
        .route("/user/login", get(login_form).post(login))
        .merge(protected);
    let dynamic = chain::dynamic(dynamic, &state, sessions);

    let app = Router::new()
        .route("/ping", get(ping))
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(dynamic);

    chain::standard(app).with_state(state)
}
