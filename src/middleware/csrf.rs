//! CSRF protection (double-submit cookie with masked tokens).
//!
//! Responsibility:
//! - Issue a random token in the `csrf_token` cookie (HttpOnly, Path=/, Secure)
//!   when the client does not have a valid one yet
//! - Hand each request a freshly masked copy (`CsrfToken`) for embedding in forms
//! - Reject unsafe-method requests whose submitted token (form field `csrf_token`
//!   or `X-CSRF-Token` header) does not unmask to the cookie token
//!
//! Masking (one-time pad || pad XOR token) keeps the embedded value different on
//! every page so it cannot be recovered by compression side channels.

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Cookie, SameSite};

use crate::error::AppError;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_FIELD: &str = "csrf_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

const TOKEN_LEN: usize = 32;
const MAX_FORM_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct CsrfConfig {
    pub secure: bool,
}

/// Masked token for the current request, placed in request extensions.
#[derive(Debug, Clone)]
pub struct CsrfToken(pub String);

pub async fn protect(State(config): State<CsrfConfig>, mut req: Request, next: Next) -> Response {
    let (token, issued) = match token_from_cookie(req.headers()) {
        Some(token) => (token, false),
        None => match random_bytes() {
            Ok(token) => (token, true),
            Err(e) => return e.into_response(),
        },
    };

    if !is_safe(req.method()) {
        let (rebuilt, submitted) = match take_submitted_token(req).await {
            Ok(parts) => parts,
            Err(response) => return response,
        };
        req = rebuilt;

        // A token issued just now cannot have been submitted by the client.
        let accepted = !issued && submitted.as_deref().is_some_and(|s| verify(&token, s));
        if !accepted {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                "rejected request with missing or invalid csrf token"
            );
            let mut response = (StatusCode::BAD_REQUEST, "Bad Request").into_response();
            if issued {
                set_cookie(&mut response, &token, config.secure);
            }
            return response;
        }
    }

    let masked = match mask(&token) {
        Ok(masked) => masked,
        Err(e) => return e.into_response(),
    };
    req.extensions_mut().insert(CsrfToken(masked));

    let mut response = next.run(req).await;
    if issued {
        set_cookie(&mut response, &token, config.secure);
    }
    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("Cookie"));
    response
}

fn is_safe(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

fn token_from_cookie(headers: &HeaderMap) -> Option<Vec<u8>> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == CSRF_COOKIE)
        .and_then(|cookie| URL_SAFE_NO_PAD.decode(cookie.value()).ok())
        .filter(|token| token.len() == TOKEN_LEN)
}

fn set_cookie(response: &mut Response, token: &[u8], secure: bool) {
    let cookie = Cookie::build((CSRF_COOKIE, URL_SAFE_NO_PAD.encode(token)))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(365))
        .build();

    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "failed to encode csrf cookie"),
    }
}

/// Pulls the submitted token from the header, or from the urlencoded body.
/// The body is buffered and put back so the handler can still read the form.
async fn take_submitted_token(req: Request) -> Result<(Request, Option<String>), Response> {
    if let Some(value) = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        let token = value.to_string();
        return Ok((req, Some(token)));
    }

    let is_form = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
    if !is_form {
        return Ok((req, None));
    }

    let (parts, body) = req.into_parts();
    let bytes: Bytes = axum::body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "failed to read form body");
            AppError::BadRequest.into_response()
        })?;

    let submitted = url::form_urlencoded::parse(&bytes)
        .find(|(name, _)| name == CSRF_FIELD)
        .map(|(_, value)| value.into_owned());

    Ok((Request::from_parts(parts, Body::from(bytes)), submitted))
}

fn random_bytes() -> Result<Vec<u8>, AppError> {
    let mut bytes = vec![0u8; TOKEN_LEN];
    getrandom::fill(&mut bytes)
        .map_err(|e| AppError::internal(anyhow::anyhow!("getrandom failed: {e}")))?;
    Ok(bytes)
}

fn mask(token: &[u8]) -> Result<String, AppError> {
    let pad = random_bytes()?;
    let mut masked = Vec::with_capacity(TOKEN_LEN * 2);
    masked.extend_from_slice(&pad);
    masked.extend(pad.iter().zip(token).map(|(p, t)| p ^ t));
    Ok(URL_SAFE_NO_PAD.encode(masked))
}

fn verify(token: &[u8], submitted: &str) -> bool {
    let Ok(decoded) = URL_SAFE_NO_PAD.decode(submitted.trim()) else {
        return false;
    };
    if decoded.len() != TOKEN_LEN * 2 {
        return false;
    }
    let (pad, masked) = decoded.split_at(TOKEN_LEN);
    let unmasked: Vec<u8> = pad.iter().zip(masked).map(|(p, m)| p ^ m).collect();
    constant_time_eq(&unmasked, token)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}
