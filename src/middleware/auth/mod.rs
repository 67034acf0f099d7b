/*
 * Responsibility
 * - authenticate: session user id -> store re-check -> AuthCtx in extensions
 * - access: route-level gate that redirects anonymous requests to the login page
 */
pub mod access;
pub mod authenticate;

pub use authenticate::authenticate;
