/*
 * Responsibility
 * - Page handlers grouped by resource
 * - Handlers validate input with forms::Form, call the stores through AppState,
 *   and render through Page; redirects after writes are 303 See Other
 */
pub mod pages;
pub mod snippets;
pub mod users;
