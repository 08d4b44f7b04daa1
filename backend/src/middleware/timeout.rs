//! Per-request deadline.
//!
//! Requests still in flight when the deadline passes are dropped, which
//! aborts the handler at its next suspension point. The middleware then
//! yields a 503 domain error that Actix renders as the error envelope.
//!
//! The request must not be cloned before the inner service runs: routing and
//! path normalisation need unique access to it.

use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::Error as DomainError;

pub(crate) const TIMED_OUT: &str = "request timed out";

/// Middleware bounding how long a single request may run.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use actix_web::App;
/// use logistic::middleware::Timeout;
///
/// let app = App::new().wrap(Timeout::new(Duration::from_secs(30)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Timeout {
    limit: Duration,
}

impl Timeout {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Timeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimeoutMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimeoutMiddleware {
            service,
            limit: self.limit,
        }))
    }
}

/// Service wrapper produced by [`Timeout`].
pub struct TimeoutMiddleware<S> {
    service: S,
    limit: Duration,
}

impl<S, B> Service<ServiceRequest> for TimeoutMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_owned();
        let limit = self.limit;
        let fut = self.service.call(req);

        Box::pin(async move {
            if let Ok(res) = tokio::time::timeout(limit, fut).await {
                return res;
            }
            warn!(
                %path,
                limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                "request exceeded deadline"
            );
            Err(DomainError::service_unavailable(TIMED_OUT).into())
        })
    }
}
