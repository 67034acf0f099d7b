use maud::{Markup, html};

use super::layout::{csrf_field, field_error, human_date};
use crate::forms::Form;
use crate::repos::Snippet;

const EXPIRY_CHOICES: [(&str, &str); 3] = [("365", "One Year"), ("7", "One Week"), ("1", "One Day")];

pub fn show(snippet: &Snippet) -> Markup {
    html! {
        div class="snippet" {
            div class="metadata" {
                strong { (snippet.title) }
                span { "#" (snippet.id) }
            }
            pre { code { (snippet.content) } }
            div class="metadata" {
                time { "Created: " (human_date(&snippet.created)) }
                time { "Expires: " (human_date(&snippet.expires)) }
            }
        }
    }
}

pub fn create(csrf_token: &str, form: &Form) -> Markup {
    let expires = match form.get("expires") {
        "" => "365",
        chosen => chosen,
    };

    html! {
        form action="/snippet/create" method="POST" {
            (csrf_field(csrf_token))
            div {
                label for="title" { "Title:" }
                (field_error(form, "title"))
                input type="text" id="title" name="title" value=(form.get("title"));
            }
            div {
                label for="content" { "Content:" }
                (field_error(form, "content"))
                textarea id="content" name="content" { (form.get("content")) }
            }
            div {
                label { "Delete in:" }
                (field_error(form, "expires"))
                @for (value, label) in EXPIRY_CHOICES {
                    input type="radio" name="expires" value=(value) checked[expires == value];
                    " " (label) " "
                }
            }
            div {
                input type="submit" value="Publish snippet";
            }
        }
    }
}
