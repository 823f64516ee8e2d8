//! Request tracing.
//!
//! Opens one `taxii_request` span per HTTP request. Handlers record the
//! message id on their own spans once the body is decoded. Protocol errors
//! travel over HTTP 200, so the outcome comes from the status type that
//! rejected responses carry as an extension.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    response::Response,
};
use shared_types::StatusType;
use std::net::SocketAddr;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, field, info_span, Instrument, Span};

/// Tracing layer that creates spans for each request
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Tracing service
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        let span = info_span!(
            "taxii_request",
            http.method = %req.method(),
            http.target = %req.uri().path(),
            peer = field::Empty,
            http.status_code = field::Empty,
            otel.status_code = field::Empty,
            taxii.status_type = field::Empty,
        );
        if let Some(peer) = peer_addr(&req) {
            span.record("peer", field::display(peer));
        }

        Box::pin(
            async move {
                let result = inner.call(req).await;

                if let Ok(response) = &result {
                    let status = response.status();
                    let span = Span::current();
                    span.record("http.status_code", status.as_u16());
                    span.record("otel.status_code", outcome(response));
                    if let Some(kind) = response.extensions().get::<StatusType>() {
                        span.record("taxii.status_type", kind.as_str());
                    }
                    debug!(status = status.as_u16(), "Request completed");
                }

                result
            }
            .instrument(span),
        )
    }
}

/// `ERROR` for status messages and server errors, `OK` otherwise.
fn outcome(response: &Response) -> &'static str {
    if response.status().is_server_error() || response.extensions().get::<StatusType>().is_some()
    {
        "ERROR"
    } else {
        "OK"
    }
}

/// Client address, present when the server was started with connect info.
fn peer_addr<B>(req: &Request<B>) -> Option<SocketAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}
