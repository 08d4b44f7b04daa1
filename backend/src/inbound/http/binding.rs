//! Request binding shared by every handler that reads a payload.
//!
//! A payload is read from the body when the request declares a content type:
//! URL-encoded forms through [`web::Form`], anything else through
//! [`web::Json`]. A `GET` without a content type binds from the query string
//! instead.

use actix_web::http::{Method, header};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

/// Payload bound from the request body or query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound<T>(pub T);

impl<T> Bound<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn has_content_type(req: &HttpRequest) -> bool {
    req.headers().contains_key(header::CONTENT_TYPE)
}

fn is_form(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
        })
}

impl<T> FromRequest for Bound<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if req.method() == Method::GET && !has_content_type(req) {
            let bound = web::Query::<T>::from_query(req.query_string())
                .map(|query| Bound(query.into_inner()))
                .map_err(actix_web::Error::from);
            return Box::pin(async move { bound });
        }

        if is_form(req) {
            let fut = web::Form::<T>::from_request(req, payload);
            return Box::pin(async move { fut.await.map(|form| Bound(form.into_inner())) });
        }

        let fut = web::Json::<T>::from_request(req, payload);
        Box::pin(async move { fut.await.map(|json| Bound(json.into_inner())) })
    }
}
