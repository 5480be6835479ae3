//! Middleware that scopes a fresh [`TraceId`] around every request.
//!
//! Log lines emitted while handling the request and any [`crate::domain::Error`]
//! built inside it carry the identifier, and the response echoes it in the
//! `trace-id` header. Work moved onto `web::block` threads does not inherit the
//! task-local; capture the id first if it is needed there.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use workshop_iam::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
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
        let trace_id = TraceId::generate();
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path()
        );
        // The scope applies while the inner future is polled.
        Box::pin(
            TraceId::scope(trace_id, {
                let fut = self.service.call(req);
                async move {
                    let mut res = fut.await?;
                    match HeaderValue::from_str(&trace_id.to_string()) {
                        Ok(value) => {
                            res.response_mut()
                                .headers_mut()
                                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                        }
                        Err(error) => {
                            error!(%error, %trace_id, "failed to encode trace identifier header");
                        }
                    }
                    Ok(res)
                }
            })
            .instrument(span),
        )
    }
}
