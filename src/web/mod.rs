/*
 * Responsibility
 * - Browser-facing surface: routes, handlers, extractors and views
 */
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod views;
