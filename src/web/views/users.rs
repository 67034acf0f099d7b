use maud::{Markup, html};

use super::layout::{csrf_field, field_error, human_date};
use crate::forms::Form;
use crate::repos::User;

// Password inputs are never given a value attribute: a re-rendered form must
// not echo the submitted password back.

pub fn signup(csrf_token: &str, form: &Form) -> Markup {
    html! {
        form action="/user/signup" method="POST" novalidate {
            (csrf_field(csrf_token))
            div {
                label for="name" { "Name:" }
                (field_error(form, "name"))
                input type="text" id="name" name="name" value=(form.get("name"));
            }
            div {
                label for="email" { "Email:" }
                (field_error(form, "email"))
                input type="email" id="email" name="email" value=(form.get("email"));
            }
            div {
                label for="password" { "Password:" }
                (field_error(form, "password"))
                input type="password" id="password" name="password";
            }
            div {
                input type="submit" value="Signup";
            }
        }
    }
}

pub fn login(csrf_token: &str, form: &Form) -> Markup {
    html! {
        form action="/user/login" method="POST" novalidate {
            (csrf_field(csrf_token))
            input type="hidden" name="redirectTo" value=(form.get("redirectTo"));
            @if let Some(message) = form.errors.get("generic") {
                div class="error" { (message) }
            }
            div {
                label for="email" { "Email:" }
                input type="email" id="email" name="email" value=(form.get("email"));
            }
            div {
                label for="password" { "Password:" }
                input type="password" id="password" name="password";
            }
            div {
                input type="submit" value="Login";
            }
        }
    }
}

pub fn profile(user: &User) -> Markup {
    html! {
        h2 { "User Profile" }
        table {
            tr { th { "Name" } td { (user.name) } }
            tr { th { "Email" } td { (user.email) } }
            tr { th { "Joined" } td { (human_date(&user.created)) } }
        }
    }
}
