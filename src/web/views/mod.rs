//! HTML rendering for pages.
//!
//! Handlers never build markup themselves: they fill a `TemplateData` bag and
//! ask a `Renderer` for a named `View`. `HtmlRenderer` is the maud implementation;
//! markup is compiled in, and every dynamic value is escaped by maud.

mod layout;
mod pages;
mod snippets;
mod users;

use thiserror::Error;

use crate::forms::Form;
use crate::repos::{Snippet, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    About,
    ShowSnippet,
    CreateSnippet,
    Signup,
    Login,
    Profile,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::About => "about",
            View::ShowSnippet => "show",
            View::CreateSnippet => "create",
            View::Signup => "signup",
            View::Login => "login",
            View::Profile => "profile",
        }
    }

    fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::About => "About",
            View::ShowSnippet => "Snippet",
            View::CreateSnippet => "Create a New Snippet",
            View::Signup => "Signup",
            View::Login => "Login",
            View::Profile => "Your Account",
        }
    }
}

/// Everything a view may draw from. Request-wide fields (`csrf_token`, `flash`,
/// `is_authenticated`, `current_year`) are filled in by `Page::render`.
#[derive(Debug, Default)]
pub struct TemplateData {
    pub current_year: i32,
    pub csrf_token: String,
    pub flash: Option<String>,
    pub form: Option<Form>,
    pub is_authenticated: bool,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    pub user: Option<User>,
}

impl TemplateData {
    pub fn with_form(form: Form) -> Self {
        Self {
            form: Some(form),
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("view `{view}` needs `{field}` in its template data")]
    MissingData {
        view: &'static str,
        field: &'static str,
    },
}

pub trait Renderer: Send + Sync {
    fn render(&self, view: View, data: &TemplateData) -> Result<String, RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: View, data: &TemplateData) -> Result<String, RenderError> {
        let missing = |field| RenderError::MissingData {
            view: view.name(),
            field,
        };

        let body = match view {
            View::Home => pages::home(&data.snippets),
            View::About => pages::about(),
            View::ShowSnippet => snippets::show(data.snippet.as_ref().ok_or(missing("snippet"))?),
            View::CreateSnippet => {
                snippets::create(&data.csrf_token, data.form.as_ref().ok_or(missing("form"))?)
            }
            View::Signup => users::signup(&data.csrf_token, data.form.as_ref().ok_or(missing("form"))?),
            View::Login => users::login(&data.csrf_token, data.form.as_ref().ok_or(missing("form"))?),
            View::Profile => users::profile(data.user.as_ref().ok_or(missing("user"))?),
        };

        Ok(layout::page(view.title(), data, body).into_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn snippet() -> Snippet {
        let created = Utc::now();
        Snippet {
            id: 3,
            title: "An old silent pond".to_string(),
            content: "<script>alert(1)</script>".to_string(),
            created,
            expires: created + Duration::days(7),
        }
    }

    #[test]
    fn show_escapes_content() {
        let data = TemplateData {
            snippet: Some(snippet()),
            ..TemplateData::default()
        };
        let html = HtmlRenderer.render(View::ShowSnippet, &data).unwrap();
        assert!(html.contains("An old silent pond"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn missing_data_is_an_error() {
        let err = HtmlRenderer
            .render(View::CreateSnippet, &TemplateData::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingData {
                view: "create",
                field: "form"
            }
        ));
    }

    #[test]
    fn forms_carry_csrf_token_and_errors_but_not_passwords() {
        let mut form = Form::new([("email", "bob@example.com"), ("password", "hunter2hunter2")]);
        form.errors.add("generic", "Email or Password is incorrect");
        let data = TemplateData {
            csrf_token: "tok123".to_string(),
            ..TemplateData::with_form(form)
        };

        let html = HtmlRenderer.render(View::Login, &data).unwrap();
        assert!(html.contains(r#"name="csrf_token" value="tok123""#));
        assert!(html.contains("Email or Password is incorrect"));
        assert!(html.contains("bob@example.com"));
        assert!(!html.contains("hunter2hunter2"));
    }

    #[test]
    fn layout_reflects_authentication_and_flash() {
        let anonymous = HtmlRenderer.render(View::About, &TemplateData::default()).unwrap();
        assert!(anonymous.contains(r#"href="/user/login""#));
        assert!(!anonymous.contains("Logout"));

        let data = TemplateData {
            is_authenticated: true,
            flash: Some("Snippet created successfully".to_string()),
            ..TemplateData::default()
        };
        let html = HtmlRenderer.render(View::About, &data).unwrap();
        assert!(html.contains("Logout"));
        assert!(html.contains("Snippet created successfully"));
        assert!(html.contains(r#"href="/snippet/create""#));
    }
}
