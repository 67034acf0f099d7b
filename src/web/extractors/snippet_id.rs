/*
 * Responsibility
 * - Take the `{id}` path segment as a String and turn it into a snippet id
 * - Not an integer, or < 1 -> 404 (the page simply does not exist)
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetId(pub i64);

fn parse(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 1)
}

impl<S> FromRequestParts<S> for SnippetId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        parse(&raw).map(Self).ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn only_positive_integers_are_ids() {
        assert_eq!(parse("1"), Some(1));
        assert_eq!(parse("42"), Some(42));
        assert_eq!(parse("0"), None);
        assert_eq!(parse("-3"), None);
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("1.5"), None);
        assert_eq!(parse(""), None);
    }
}
