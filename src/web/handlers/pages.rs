use axum::{extract::State, response::Html};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::extractors::Page;
use crate::web::views::{TemplateData, View};

pub async fn home(State(state): State<AppState>, page: Page) -> Result<Html<String>, AppError> {
    let snippets = state.snippets.latest().await?;
    page.render(
        View::Home,
        TemplateData {
            snippets,
            ..TemplateData::default()
        },
    )
    .await
}

pub async fn about(page: Page) -> Result<Html<String>, AppError> {
    page.render(View::About, TemplateData::default()).await
}

/// Liveness probe. Served on the standard chain only (no session, no CSRF).
pub async fn ping() -> &'static str {
    "OK"
}
