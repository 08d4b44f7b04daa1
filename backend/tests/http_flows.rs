//! End-to-end HTTP flows over in-memory stores: registration, login, the
//! bearer and basic gates, and the error envelope.

#[path = "support/http_app.rs"]
mod http_app;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use http_app::{Harness, basic_header};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use logistic::domain::TRACE_ID_HEADER;
use logistic::domain::ports::TokenService;
use logistic::outbound::token::{DEFAULT_TOKEN_TTL, JwtTokenService};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let res = actix_test::call_service(&$app, $req.to_request()).await;
        let status = res.status();
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = actix_test::read_body(res).await;
        let json: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json body")
        };
        (status, trace_id, json)
    }};
}

fn register_req(username: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/orm/users").set_json(json!({
        "username": username,
        "password": password,
        "address": "Jl. Sudirman 5"
    }))
}

fn login_req(username: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/orm/login")
        .set_json(json!({ "username": username, "password": password }))
}

#[rstest]
#[actix_web::test]
async fn register_login_and_create_vendor(harness: Harness) {
    let app = actix_test::init_service(harness.app()).await;

    let (status, _, body) = send!(app, register_req("alice", "s3cret"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["address"], "Jl. Sudirman 5");
    assert!(!body.to_string().contains("s3cret"));
    assert!(!body.to_string().contains("argon2"));

    let (status, _, body) = send!(app, login_req("alice", "s3cret"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    let token = body["token"].as_str().expect("token").to_owned();
    assert_eq!(token.split('.').count(), 3);

    let claims = harness.tokens.verify(&token).expect("login token verifies");
    assert_eq!(claims.id, 1);
    assert!(claims.authorized);

    let (status, _, body) = send!(
        app,
        actix_test::TestRequest::post()
            .uri("/orm/vendors")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(json!({
                "name": "Kilat",
                "category": "truck",
                "hp": "0812",
                "vehicle_type": "box"
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["phone"], "0812");

    let (status, _, body) = send!(app, actix_test::TestRequest::get().uri("/orm/vendor"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case::wrong_password("alice", "nope")]
#[case::unknown_user("bob", "s3cret")]
#[actix_web::test]
async fn login_misses_are_indistinguishable(
    harness: Harness,
    #[case] username: &str,
    #[case] password: &str,
) {
    let app = actix_test::init_service(harness.app()).await;
    send!(app, register_req("alice", "s3cret"));

    let (status, _, body) = send!(app, login_req(username, password));

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "cannot find any data");
    assert!(body.get("token").is_none());
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_conflicts_without_new_record(harness: Harness) {
    let app = actix_test::init_service(harness.app()).await;
    send!(app, register_req("alice", "s3cret"));

    let (status, _, body) = send!(app, register_req("alice", "other"));

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"]["field"], "username");
    assert_eq!(harness.users.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn expired_token_is_rejected_before_any_write(harness: Harness) {
    let app = actix_test::init_service(harness.app()).await;
    send!(app, register_req("alice", "s3cret"));
    let (_, _, body) = send!(app, login_req("alice", "s3cret"));
    let token = body["token"].as_str().expect("token").to_owned();

    harness.clock.advance_seconds(3600);
    let (status, trace_id, body) = send!(
        app,
        actix_test::TestRequest::post()
            .uri("/orm/vendors")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(json!({ "name": "Late" }))
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());
    assert!(harness.vendors.is_empty());
}

/// Replace the payload segment of a signed token, keeping its signature.
fn with_edited_payload(token: &str, user_id: i64) -> String {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature)) = (parts.next(), parts.next(), parts.next())
    else {
        panic!("token has three segments");
    };
    let decoded = URL_SAFE_NO_PAD.decode(payload).expect("payload is base64url");
    let mut claims: Value = serde_json::from_slice(&decoded).expect("payload is json");
    claims["id"] = json!(user_id);
    let edited = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{edited}.{signature}")
}

fn signed_with_other_secret(harness: &Harness) -> String {
    let foreign = JwtTokenService::new(
        b"some-other-secret-0123456789abcdef",
        DEFAULT_TOKEN_TTL,
        harness.clock.clone(),
    );
    let id = logistic::domain::UserId::new(1).expect("positive id");
    foreign.issue(id).expect("issue").as_str().to_owned()
}

#[rstest]
#[case::edited_payload(true)]
#[case::foreign_secret(false)]
#[actix_web::test]
async fn tampered_tokens_are_rejected_before_any_write(
    harness: Harness,
    #[case] edit_payload: bool,
) {
    let app = actix_test::init_service(harness.app()).await;
    send!(app, register_req("alice", "s3cret"));
    let (_, _, body) = send!(app, login_req("alice", "s3cret"));
    let genuine = body["token"].as_str().expect("token").to_owned();
    let token = if edit_payload {
        with_edited_payload(&genuine, 2)
    } else {
        signed_with_other_secret(&harness)
    };

    let (status, trace_id, body) = send!(
        app,
        actix_test::TestRequest::post()
            .uri("/orm/vendors")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(json!({ "name": "Forged", "category": "truck" }))
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());
    assert!(harness.vendors.is_empty());
}

#[rstest]
#[actix_web::test]
async fn basic_gate_filters_by_category(harness: Harness) {
    let app = actix_test::init_service(harness.app()).await;
    send!(app, register_req("alice", "s3cret"));
    let (_, _, body) = send!(app, login_req("alice", "s3cret"));
    let token = body["token"].as_str().expect("token").to_owned();
    for (name, category) in [("Kilat", "truck"), ("Cepat", "van"), ("Besar", "truck")] {
        send!(
            app,
            actix_test::TestRequest::post()
                .uri("/orm/vendors")
                .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
                .set_form([("name", name), ("category", category)])
        );
    }

    let (status, _, body) = send!(
        app,
        actix_test::TestRequest::get()
            .uri("/orm/dateVendor/truck/")
            .insert_header((header::AUTHORIZATION, basic_header("alice", "s3cret")))
    );
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|v| v["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Kilat", "Besar"]);

    let (status, _, _) = send!(
        app,
        actix_test::TestRequest::get()
            .uri("/orm/dateVendor/truck")
            .insert_header((header::AUTHORIZATION, basic_header("alice", "wrong")))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn unreachable_store_yields_service_unavailable(harness: Harness) {
    let app = actix_test::init_service(harness.app()).await;
    harness.users.set_offline(true);
    harness.vendors.set_offline(true);

    let (status, _, body) = send!(app, register_req("alice", "s3cret"));
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "database unavailable");

    let (status, _, _) = send!(app, actix_test::TestRequest::get().uri("/orm/vendor"));
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[actix_web::test]
async fn health_probes_report_ready(harness: Harness) {
    let app = actix_test::init_service(harness.app()).await;

    let (status, trace_id, _) = send!(app, actix_test::TestRequest::get().uri("/health/ready"));

    assert_eq!(status, StatusCode::OK);
    assert!(trace_id.is_some());
}
