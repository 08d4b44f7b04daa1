//! Login and registration handlers.
//!
//! ```text
//! POST /orm/users {"username":"alice","password":"s3cret","address":"Jl. Merdeka 1"}
//! POST /orm/login {"username":"alice","password":"s3cret"}
//! GET  /orm/login?username=alice&password=s3cret
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, route, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Error, LoginCredentials, NewUser, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::binding::Bound;
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::schemas::{ErrorSchema, LoginEnvelopeSchema, UserEnvelopeSchema};
use crate::inbound::http::state::HttpState;

pub(crate) const LOGIN_BIND_FAILED: &str = "cannot process data";
pub(crate) const READ_FAILED: &str = "cannot read data";

/// Login payload; missing fields bind as empty strings.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration payload. `alamat` is accepted for `address`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(alias = "alamat")]
    pub address: String,
}

/// Public projection of a user; never carries the password or its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Jl. Merdeka 1")]
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().to_owned(),
            address: user.address().to_owned(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Exchange credentials for a bearer token.
///
/// Unknown usernames and wrong passwords are indistinguishable: both answer
/// 404 `cannot find any data`.
#[utoipa::path(
    method(get, post),
    path = "/orm/login",
    request_body = LoginRequest,
    params(
        ("username" = Option<String>, Query, description = "Username when binding from the query string"),
        ("password" = Option<String>, Query, description = "Password when binding from the query string")
    ),
    responses(
        (status = 200, description = "Login success", body = LoginEnvelopeSchema),
        (status = 400, description = "Payload could not be bound", body = ErrorSchema),
        (status = 404, description = "No user matches the credentials", body = ErrorSchema),
        (status = 500, description = "Token could not be issued", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[route("/login", method = "GET", method = "POST")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: Result<Bound<LoginRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { username, password } = payload
        .map_err(|err| {
            warn!(error = %err, "login payload rejected");
            Error::invalid_request(LOGIN_BIND_FAILED)
        })?
        .into_inner();

    let credentials = LoginCredentials::new(username, password);
    let outcome = state.login.login(&credentials).await?;

    Ok(
        ApiEnvelope::new("success on login", UserResponse::from(&outcome.user))
            .with_token(outcome.token.into_string())
            .respond(StatusCode::OK),
    )
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/orm/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelopeSchema),
        (status = 400, description = "Payload could not be bound", body = ErrorSchema),
        (status = 409, description = "Username already registered", body = ErrorSchema),
        (status = 500, description = "User could not be stored", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: Result<Bound<RegisterRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        password,
        address,
    } = payload
        .map_err(|err| {
            warn!(error = %err, "registration payload rejected");
            Error::invalid_request(READ_FAILED)
        })?
        .into_inner();

    let user = state
        .registration
        .register(NewUser::new(username, password, address))
        .await?;

    Ok(ApiEnvelope::new("success insert new user", UserResponse::from(&user))
        .respond(StatusCode::CREATED))
}
