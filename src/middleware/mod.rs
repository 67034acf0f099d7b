/*
 * Responsibility
 * - Public interface of the middleware layer (re-exports)
 * - chain::{standard, dynamic, protected} is what routes.rs uses
 */
pub mod auth;
pub mod chain;
pub mod csrf;
pub mod http;
pub mod security_headers;

pub use csrf::CsrfToken;
