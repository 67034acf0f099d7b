/*
 * Responsibility
 * - /snippet/{id}: show one unexpired snippet
 * - /snippet/create: form + create (login required, see routes.rs)
 */
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::forms::Form;
use crate::session::FLASH;
use crate::state::AppState;
use crate::web::extractors::{FormData, Page, SnippetId};
use crate::web::views::{TemplateData, View};

pub const TITLE_MAX: usize = 100;
pub const CONTENT_MAX: usize = 500;
pub const EXPIRES_OPTIONS: [&str; 3] = ["365", "7", "1"];

pub async fn show_snippet(
    State(state): State<AppState>,
    page: Page,
    SnippetId(id): SnippetId,
) -> Result<Html<String>, AppError> {
    let snippet = state.snippets.get(id).await?;
    page.render(
        View::ShowSnippet,
        TemplateData {
            snippet: Some(snippet),
            ..TemplateData::default()
        },
    )
    .await
}

pub async fn create_snippet_form(page: Page) -> Result<Html<String>, AppError> {
    page.render(View::CreateSnippet, TemplateData::with_form(Form::empty()))
        .await
}

pub async fn create_snippet(
    State(state): State<AppState>,
    page: Page,
    FormData(mut form): FormData,
) -> Result<Response, AppError> {
    validate(&mut form);
    if !form.valid() {
        tracing::debug!(
            fields = ?form.errors.fields().collect::<Vec<_>>(),
            "snippet form rejected"
        );
        let html = page
            .render(View::CreateSnippet, TemplateData::with_form(form))
            .await?;
        return Ok(html.into_response());
    }

    // permitted_values above guarantees one of EXPIRES_OPTIONS.
    let expires_days: i32 = form.get("expires").parse().map_err(AppError::internal)?;
    let id = state
        .snippets
        .insert(form.get("title"), form.get("content"), expires_days)
        .await?;
    tracing::debug!(snippet_id = id, "snippet created");

    page.session()
        .put(FLASH, "Snippet created successfully")
        .await?;
    Ok(Redirect::to(&format!("/snippet/{id}")).into_response())
}

fn validate(form: &mut Form) {
    form.required(&["title", "content", "expires"])
        .max_length("title", TITLE_MAX)
        .max_length("content", CONTENT_MAX)
        .permitted_values("expires", &EXPIRES_OPTIONS)
        .custom("title", |field, value, form| {
            if value.trim().eq_ignore_ascii_case("untitled") {
                form.fail(field, "This value is not allowed");
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_collects_every_failure() {
        let mut form = Form::new([
            ("title", "x".repeat(TITLE_MAX + 1)),
            ("content", String::new()),
            ("expires", "30".to_string()),
        ]);
        validate(&mut form);

        assert_eq!(
            form.errors.get("title"),
            Some("This field is too long (maximum is 100 characters)")
        );
        assert_eq!(form.errors.get("content"), Some("This field cannot be blank"));
        assert_eq!(form.errors.get("expires"), Some("This field is not valid"));
    }

    #[test]
    fn placeholder_title_is_rejected() {
        let mut form = Form::new([("title", " Untitled "), ("content", "body"), ("expires", "7")]);
        validate(&mut form);
        assert_eq!(form.errors.all("title"), ["This value is not allowed"]);
        assert_eq!(form.errors.len(), 1);
    }

    #[test]
    fn well_formed_snippet_passes() {
        let mut form = Form::new([("title", "O snail"), ("content", "Climb Mount Fuji"), ("expires", "365")]);
        validate(&mut form);
        assert!(form.valid());
    }
}
