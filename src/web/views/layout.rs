//! Page shell shared by every view: head, navigation, flash, footer.

use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, html};

use super::TemplateData;
use crate::forms::Form;

pub fn page(title: &str, data: &TemplateData, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Snippetbox" }
                link rel="stylesheet" href="/static/css/main.css";
            }
            body {
                header {
                    h1 { a href="/" { "Snippetbox" } }
                }
                nav {
                    div {
                        a href="/" { "Home" }
                        a href="/about" { "About" }
                        @if data.is_authenticated {
                            a href="/snippet/create" { "Create snippet" }
                        }
                    }
                    div {
                        @if data.is_authenticated {
                            a href="/user/profile" { "Profile" }
                            form action="/user/logout" method="POST" {
                                (csrf_field(&data.csrf_token))
                                button { "Logout" }
                            }
                        } @else {
                            a href="/user/signup" { "Signup" }
                            a href="/user/login" { "Login" }
                        }
                    }
                }
                main {
                    @if let Some(flash) = &data.flash {
                        div class="flash" { (flash) }
                    }
                    (body)
                }
                footer {
                    "Powered by Rust in " (data.current_year)
                }
            }
        }
    }
}

pub fn csrf_field(token: &str) -> Markup {
    html! {
        input type="hidden" name="csrf_token" value=(token);
    }
}

pub fn field_error(form: &Form, field: &str) -> Markup {
    html! {
        @if let Some(message) = form.errors.get(field) {
            label class="error" { (message) }
        }
    }
}

pub fn human_date(t: &DateTime<Utc>) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}
