//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their wire shape instead. The envelope wrappers pin
//! the generic [`super::envelope::ApiEnvelope`] to each concrete payload.

use utoipa::ToSchema;

use super::users::UserResponse;
use super::vendors::VendorResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The payload could not be bound.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A gate rejected the caller.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Nothing matched the lookup.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write collides with an existing record.
    #[schema(rename = "conflict")]
    Conflict,
    /// The store or the request deadline gave out.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "cannot find any data")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, such as the conflicting field.
    details: Option<serde_json::Value>,
}

/// Login success body: the user plus a bearer token.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LoginEnvelopeSchema {
    #[schema(example = "success on login")]
    message: String,
    data: UserResponse,
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl")]
    token: String,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserEnvelopeSchema {
    #[schema(example = "success insert new user")]
    message: String,
    data: UserResponse,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct VendorEnvelopeSchema {
    #[schema(example = "success insert new Vendor")]
    message: String,
    data: VendorResponse,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct VendorListEnvelopeSchema {
    #[schema(example = "success get all data")]
    message: String,
    data: Vec<VendorResponse>,
}
