/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - snippet/user stores, the view renderer, cookie flags
 * - Cheap to Clone (Arc inside); built once in app::run and injected, never global
 */
use std::sync::Arc;

use crate::repos::{SnippetStore, UserStore};
use crate::web::views::Renderer;

#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<dyn SnippetStore>,
    pub users: Arc<dyn UserStore>,
    pub renderer: Arc<dyn Renderer>,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        snippets: Arc<dyn SnippetStore>,
        users: Arc<dyn UserStore>,
        renderer: Arc<dyn Renderer>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            snippets,
            users,
            renderer,
            secure_cookies,
        }
    }
}
