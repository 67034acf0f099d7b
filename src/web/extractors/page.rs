/*
 * Responsibility
 * - Per-request rendering context: session, masked CSRF token, auth flag, renderer
 * - render(): fill the request-wide template fields, pop the flash message,
 *   and render the view into an Html response body
 */
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{Html, IntoResponse, Response},
};
use chrono::{Datelike, Utc};

use crate::error::AppError;
use crate::middleware::CsrfToken;
use crate::session::{AppSession, FLASH};
use crate::state::AppState;
use crate::web::extractors::AuthCtx;
use crate::web::views::{Renderer, TemplateData, View};

pub struct Page {
    session: AppSession,
    csrf_token: String,
    is_authenticated: bool,
    renderer: Arc<dyn Renderer>,
}

impl Page {
    pub fn session(&self) -> &AppSession {
        &self.session
    }

    pub async fn render(&self, view: View, mut data: TemplateData) -> Result<Html<String>, AppError> {
        data.current_year = Utc::now().year();
        data.csrf_token = self.csrf_token.clone();
        data.is_authenticated = self.is_authenticated;
        data.flash = self.session.pop_string(FLASH).await?;

        let html = self.renderer.render(view, &data)?;
        Ok(Html(html))
    }
}

impl FromRequestParts<AppState> for Page {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = AppSession::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let csrf_token = parts
            .extensions
            .get::<CsrfToken>()
            .map(|t| t.0.clone())
            .unwrap_or_default();
        let is_authenticated = parts.extensions.get::<AuthCtx>().is_some();

        Ok(Self {
            session,
            csrf_token,
            is_authenticated,
            renderer: state.renderer.clone(),
        })
    }
}
