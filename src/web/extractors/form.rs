/*
 * Responsibility
 * - Read an application/x-www-form-urlencoded body into a forms::Form
 * - Anything else (wrong content type, unreadable or oversized body) is 400
 */
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};

use crate::error::AppError;
use crate::forms::Form;

#[derive(Debug)]
pub struct FormData(pub Form);

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
        if !is_form {
            return Err(AppError::BadRequest);
        }

        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read form body");
            AppError::BadRequest
        })?;

        Ok(Self(Form::new(url::form_urlencoded::parse(&body).into_owned())))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[tokio::test]
    async fn parses_repeated_and_encoded_fields() {
        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("title=Hello+world&tag=a&tag=b&note=caf%C3%A9"))
            .unwrap();

        let FormData(form) = FormData::from_request(req, &()).await.unwrap();
        assert_eq!(form.get("title"), "Hello world");
        assert_eq!(form.get("tag"), "a");
        assert_eq!(form.get("note"), "café");
        assert_eq!(form.get("missing"), "");
    }

    #[tokio::test]
    async fn non_form_body_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        assert!(matches!(
            FormData::from_request(req, &()).await,
            Err(AppError::BadRequest)
        ));
    }
}
