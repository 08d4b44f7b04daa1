//! Success envelope shared by every handler.
//!
//! ```text
//! {"message": "success get all data", "data": [...]}
//! {"message": "success on login", "data": {...}, "token": "eyJ..."}
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// JSON body returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiEnvelope<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Render with `status`.
    pub fn respond(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn token_is_omitted_unless_set() {
        let plain = serde_json::to_value(ApiEnvelope::new("ok", 1)).expect("serialise");
        assert_eq!(plain, json!({ "message": "ok", "data": 1 }));

        let with_token =
            serde_json::to_value(ApiEnvelope::new("ok", 1).with_token("t")).expect("serialise");
        assert_eq!(with_token, json!({ "message": "ok", "data": 1, "token": "t" }));
    }
}
