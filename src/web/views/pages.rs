use maud::{Markup, html};

use super::layout::human_date;
use crate::repos::Snippet;

pub fn home(snippets: &[Snippet]) -> Markup {
    html! {
        h2 { "Latest Snippets" }
        @if snippets.is_empty() {
            p { "There's nothing to see here... yet!" }
        } @else {
            table {
                tr {
                    th { "Title" }
                    th { "Created" }
                    th { "ID" }
                }
                @for snippet in snippets {
                    tr {
                        td { a href={ "/snippet/" (snippet.id) } { (snippet.title) } }
                        td { (human_date(&snippet.created)) }
                        td { "#" (snippet.id) }
                    }
                }
            }
        }
    }
}

pub fn about() -> Markup {
    html! {
        h2 { "About" }
        p {
            "Snippetbox is a place to paste and share short pieces of text. "
            "Sign up to create your own snippets; they expire after a day, a week or a year."
        }
    }
}
