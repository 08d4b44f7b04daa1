//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the schema
//! wrappers from [`crate::inbound::http::schemas`], and the two access
//! schemes used by the gated vendor routes. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, LoginEnvelopeSchema, UserEnvelopeSchema, VendorEnvelopeSchema,
    VendorListEnvelopeSchema,
};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserResponse};
use crate::inbound::http::vendors::{CreateVendorRequest, VendorResponse};

/// Security scheme name for routes behind the bearer gate.
pub const BEARER_SCHEME: &str = "BearerAuth";
/// Security scheme name for routes behind the basic-credential gate.
pub const BASIC_SCHEME: &str = "BasicAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token returned by /orm/login."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            BASIC_SCHEME,
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Logistic vendor directory API",
        description = "User registration and login, plus a vendor directory with bearer and basic access gates."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::register,
        crate::inbound::http::vendors::list_vendors,
        crate::inbound::http::vendors::vendors_by_category,
        crate::inbound::http::vendors::create_vendor,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        RegisterRequest,
        UserResponse,
        CreateVendorRequest,
        VendorResponse,
        LoginEnvelopeSchema,
        UserEnvelopeSchema,
        VendorEnvelopeSchema,
        VendorListEnvelopeSchema,
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "vendors", description = "Vendor directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
