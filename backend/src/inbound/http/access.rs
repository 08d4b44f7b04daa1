//! Route-level access gates.
//!
//! Each gate is an Actix extractor: listing it among a handler's arguments
//! makes the handler body unreachable unless the gate succeeds. Rejections
//! are single-shot, keep no server-side state, and happen before any store
//! mutation.

use actix_web::error::InternalError;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{FromRequest, HttpRequest, ResponseError, dev::Payload, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{Error, LoginCredentials, TokenClaims, User, UserId};

use super::state::HttpState;

pub(crate) const MISSING_TOKEN: &str = "missing or malformed jwt";
pub(crate) const INVALID_TOKEN: &str = "invalid or expired jwt";
pub(crate) const MISSING_BASIC: &str = "missing or malformed basic credentials";
const BASIC_CHALLENGE: &str = "basic realm=\"Restricted\"";

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("http state not configured"))
}

/// Payload following `scheme` in the `Authorization` header, if the scheme
/// matches case-insensitively.
fn authorization_param<'a>(req: &'a HttpRequest, scheme: &str) -> Option<&'a str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (found, param) = value.split_once(' ')?;
    if !found.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let param = param.trim();
    (!param.is_empty()).then_some(param)
}

/// Caller authenticated by a verified bearer token.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    claims: TokenClaims,
}

impl BearerIdentity {
    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    /// User the token was issued to, read through the `id` claim.
    pub fn user_id(&self) -> Option<UserId> {
        self.claims.user_id()
    }
}

fn bearer_identity(req: &HttpRequest) -> Result<BearerIdentity, Error> {
    let state = http_state(req)?;
    let token =
        authorization_param(req, "Bearer").ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;
    let claims = state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::unauthorized(INVALID_TOKEN)
    })?;
    Ok(BearerIdentity { claims })
}

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_identity(req))
    }
}

/// Caller authenticated by basic credentials matching a stored identity.
#[derive(Debug, Clone)]
pub struct BasicIdentity(User);

impl BasicIdentity {
    pub fn user(&self) -> &User {
        &self.0
    }
}

fn decode_basic(param: &str) -> Option<LoginCredentials> {
    let decoded = STANDARD.decode(param).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some(LoginCredentials::new(username, password))
}

/// Attach the basic challenge to 401 responses so clients know to retry with
/// credentials.
fn challenge(err: Error) -> actix_web::Error {
    let mut response = err.error_response();
    if response.status() == actix_web::http::StatusCode::UNAUTHORIZED {
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(BASIC_CHALLENGE),
        );
    }
    InternalError::from_response(err, response).into()
}

impl FromRequest for BasicIdentity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = http_state(req);
        let credentials = authorization_param(req, "Basic").and_then(decode_basic);

        Box::pin(async move {
            let state = state.map_err(challenge)?;
            let credentials =
                credentials.ok_or_else(|| challenge(Error::unauthorized(MISSING_BASIC)))?;
            state
                .credentials
                .verify_credentials(&credentials)
                .await
                .map(BasicIdentity)
                .map_err(challenge)
        })
    }
}
