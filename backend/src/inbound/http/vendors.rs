//! Vendor directory handlers.
//!
//! ```text
//! GET  /orm/vendor
//! GET  /orm/dateVendor/truck            (basic credentials)
//! POST /orm/vendors {"name":"Kilat","category":"truck","hp":"0812","vehicle_type":"box"}
//!                                        (bearer token)
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Error, NewVendor, Vendor, VendorFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::{BasicIdentity, BearerIdentity};
use crate::inbound::http::binding::Bound;
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::schemas::{ErrorSchema, VendorEnvelopeSchema, VendorListEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::READ_FAILED;

/// Vendor payload, keyed like [`VendorResponse`]. The legacy wire names
/// `hp` and `vehicle_type` are accepted for `phone` and `vehicleType`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVendorRequest {
    pub name: String,
    pub category: String,
    #[serde(alias = "hp")]
    pub phone: String,
    #[serde(alias = "vehicle_type")]
    pub vehicle_type: String,
}

impl From<CreateVendorRequest> for NewVendor {
    fn from(value: CreateVendorRequest) -> Self {
        Self {
            name: value.name,
            category: value.category,
            phone: value.phone,
            vehicle_type: value.vehicle_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Kilat Express")]
    pub name: String,
    #[schema(example = "truck")]
    pub category: String,
    #[schema(example = "08123456789")]
    pub phone: String,
    #[schema(example = "box")]
    pub vehicle_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vendor> for VendorResponse {
    fn from(vendor: Vendor) -> Self {
        Self {
            id: vendor.id.get(),
            name: vendor.name,
            category: vendor.category,
            phone: vendor.phone,
            vehicle_type: vendor.vehicle_type,
            created_at: vendor.created_at,
            updated_at: vendor.updated_at,
        }
    }
}

fn to_responses(vendors: Vec<Vendor>) -> Vec<VendorResponse> {
    vendors.into_iter().map(VendorResponse::from).collect()
}

/// List every vendor, ordered by id.
#[utoipa::path(
    get,
    path = "/orm/vendor",
    responses(
        (status = 200, description = "All vendors", body = VendorListEnvelopeSchema),
        (status = 500, description = "Listing failed", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["vendors"],
    operation_id = "listVendors",
    security([])
)]
#[get("/vendor")]
pub async fn list_vendors(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let vendors = state.vendors_query.list_vendors(&VendorFilter::All).await?;
    Ok(ApiEnvelope::new("success get all data", to_responses(vendors)).respond(StatusCode::OK))
}

/// List vendors whose category equals the path segment exactly.
#[utoipa::path(
    get,
    path = "/orm/dateVendor/{category}",
    params(("category" = String, Path, description = "Exact category to match")),
    responses(
        (status = 200, description = "Matching vendors", body = VendorListEnvelopeSchema),
        (status = 401, description = "Missing or wrong basic credentials", body = ErrorSchema),
        (status = 500, description = "Listing failed", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["vendors"],
    operation_id = "listVendorsByCategory",
    security(("BasicAuth" = []))
)]
#[get("/dateVendor/{category}")]
pub async fn vendors_by_category(
    identity: BasicIdentity,
    state: web::Data<HttpState>,
    category: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let filter = VendorFilter::Category(category.into_inner());
    info!(user = identity.user().username(), ?filter, "category listing");
    let vendors = state.vendors_query.list_vendors(&filter).await?;
    Ok(
        ApiEnvelope::new("success get specific data", to_responses(vendors))
            .respond(StatusCode::OK),
    )
}

/// Create a vendor.
#[utoipa::path(
    post,
    path = "/orm/vendors",
    request_body = CreateVendorRequest,
    responses(
        (status = 201, description = "Vendor created", body = VendorEnvelopeSchema),
        (status = 400, description = "Payload could not be bound", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Vendor could not be stored", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["vendors"],
    operation_id = "createVendor",
    security(("BearerAuth" = []))
)]
#[post("/vendors")]
pub async fn create_vendor(
    identity: BearerIdentity,
    state: web::Data<HttpState>,
    payload: Result<Bound<CreateVendorRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let request = payload
        .map_err(|err| {
            warn!(error = %err, "vendor payload rejected");
            Error::invalid_request(READ_FAILED)
        })?
        .into_inner();

    let vendor = state
        .vendors_command
        .create_vendor(NewVendor::from(request))
        .await?;
    info!(user = ?identity.user_id(), vendor = %vendor.id, "vendor created");

    Ok(
        ApiEnvelope::new("success insert new Vendor", VendorResponse::from(vendor))
            .respond(StatusCode::CREATED),
    )
}
