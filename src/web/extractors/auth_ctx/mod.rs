/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand handlers the context of an authenticated request (AuthCtx)
 * - HTTP / axum specifics live in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
