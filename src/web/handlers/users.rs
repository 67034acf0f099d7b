/*
 * Responsibility
 * - signup / login / logout / profile
 * - Login rotates the session id before storing the user id; logout rotates it again
 * - Login failures never say which of email or password was wrong
 */
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::forms::{EMAIL_RX, Form};
use crate::repos::error::RepoError;
use crate::session::{AUTHENTICATED_USER_ID, FLASH};
use crate::state::AppState;
use crate::web::extractors::{AuthCtxExtractor, FormData, Page};
use crate::web::views::{TemplateData, View};

pub const PASSWORD_MIN: usize = 10;
pub const DEFAULT_AFTER_LOGIN: &str = "/snippet/create";

pub async fn signup_form(page: Page) -> Result<Html<String>, AppError> {
    page.render(View::Signup, TemplateData::with_form(Form::empty()))
        .await
}

pub async fn signup(
    State(state): State<AppState>,
    page: Page,
    FormData(mut form): FormData,
) -> Result<Response, AppError> {
    form.required(&["name", "email", "password"])
        .max_length("name", 255)
        .max_length("email", 255)
        .matches_pattern("email", &EMAIL_RX)
        .min_length("password", PASSWORD_MIN);

    if !form.valid() {
        return render_form(&page, View::Signup, form).await;
    }

    let inserted = state
        .users
        .insert(form.get("name"), form.get("email"), form.get("password"))
        .await;
    match inserted {
        Ok(()) => {}
        Err(RepoError::DuplicateEmail) => {
            form.errors.add("email", "Address is already in use");
            return render_form(&page, View::Signup, form).await;
        }
        Err(e) => return Err(e.into()),
    }

    page.session()
        .put(FLASH, "Your signup was successful. Please log in.")
        .await?;
    Ok(Redirect::to("/user/login").into_response())
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "redirectTo")]
    redirect_to: Option<String>,
}

pub async fn login_form(
    page: Page,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, AppError> {
    let mut form = Form::empty();
    if let Some(target) = query.redirect_to {
        form.set("redirectTo", target);
    }
    page.render(View::Login, TemplateData::with_form(form)).await
}

pub async fn login(
    State(state): State<AppState>,
    page: Page,
    FormData(mut form): FormData,
) -> Result<Response, AppError> {
    let result = state
        .users
        .authenticate(form.get("email"), form.get("password"))
        .await;
    let user_id = match result {
        Ok(id) => id,
        Err(RepoError::InvalidCredentials) => {
            tracing::warn!("login failed: invalid credentials");
            form.errors.add("generic", "Email or Password is incorrect");
            return render_form(&page, View::Login, form).await;
        }
        Err(e) => return Err(e.into()),
    };

    let session = page.session();
    session.renew().await?;
    session.put(AUTHENTICATED_USER_ID, user_id).await?;
    tracing::info!(user_id, "user logged in");

    Ok(Redirect::to(local_redirect(form.get("redirectTo"))).into_response())
}

pub async fn logout(page: Page) -> Result<Response, AppError> {
    let session = page.session();
    session.remove(AUTHENTICATED_USER_ID).await?;
    session.renew().await?;
    session
        .put(FLASH, "You've been logged out successfully!")
        .await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn profile(
    State(state): State<AppState>,
    page: Page,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Html<String>, AppError> {
    let user = state.users.get(ctx.user_id).await?;
    page.render(
        View::Profile,
        TemplateData {
            user: Some(user),
            ..TemplateData::default()
        },
    )
    .await
}

async fn render_form(page: &Page, view: View, form: Form) -> Result<Response, AppError> {
    let html = page.render(view, TemplateData::with_form(form)).await?;
    Ok(html.into_response())
}

/// Only same-site absolute paths are followed after login; anything else
/// (external URLs, scheme-relative `//host`, empty) falls back to the default.
fn local_redirect(target: &str) -> &str {
    let is_local = target.starts_with('/') && !target.starts_with("//") && !target.contains('\\');
    if is_local { target } else { DEFAULT_AFTER_LOGIN }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_target_must_be_a_local_path() {
        assert_eq!(local_redirect("/user/profile"), "/user/profile");
        assert_eq!(local_redirect(""), DEFAULT_AFTER_LOGIN);
        assert_eq!(local_redirect("https://evil.example"), DEFAULT_AFTER_LOGIN);
        assert_eq!(local_redirect("//evil.example"), DEFAULT_AFTER_LOGIN);
        assert_eq!(local_redirect("/\\evil.example"), DEFAULT_AFTER_LOGIN);
    }
}
