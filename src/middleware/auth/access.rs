//! requireAuthentication: gate for routes that need a logged-in user.
//!
//! Must sit downstream of `authenticate`, which is what decides whether an
//! `AuthCtx` is present.

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};

use crate::web::extractors::auth_ctx::AuthCtx;

pub const LOGIN_PATH: &str = "/user/login";

/// Applies the gate to every route already registered on `router`.
///
/// `route_layer` keeps unmatched paths returning 404 instead of a login redirect.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn(require_authentication))
}

pub async fn require_authentication(req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthCtx>().is_none() {
        let target = format!("{LOGIN_PATH}?redirectTo={}", req.uri().path());
        return Redirect::to(&target).into_response();
    }

    // Pages behind login must not be stored by shared or browser caches.
    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    async fn insert_ctx(mut req: Request<Body>, next: Next) -> Response {
        if req.headers().contains_key("x-test-user") {
            req.extensions_mut().insert(AuthCtx::new(1));
        }
        next.run(req).await
    }

    fn app() -> Router {
        apply(Router::new().route("/snippet/create", get(|| async { "form" })))
            .layer(middleware::from_fn(insert_ctx))
    }

    #[tokio::test]
    async fn anonymous_is_redirected_with_requested_path() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/snippet/create?x=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/user/login?redirectTo=/snippet/create"
        );
    }

    #[tokio::test]
    async fn authenticated_passes_with_no_store() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/snippet/create")
                    .header("x-test-user", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }

    #[tokio::test]
    async fn unknown_paths_are_not_redirected() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
