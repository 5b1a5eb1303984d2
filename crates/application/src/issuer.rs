//! Request issuer use case
//!
//! Sends a single GET or POST and wraps whatever comes back in a
//! [`TestResponse`]. Failures are reported to the test context; the call
//! itself always returns a wrapper.

use std::sync::Arc;

use probe_domain::{AssertionFailure, HeaderSet, HttpMethod, OutgoingRequest, ParameterSet};

use crate::ports::{DocumentQuery, TestContext, Transport};
use crate::response::TestResponse;

/// Use case for issuing test requests.
///
/// # Example
///
/// ```ignore
/// let issuer = RequestIssuer::new(Arc::new(transport), Arc::new(query));
/// let log = FailureLog::new();
///
/// let mut response = issuer.get("http://localhost:8080/", None, None, &log).await;
/// response.assert_code(200, &log);
/// ```
pub struct RequestIssuer<T: Transport, Q: DocumentQuery> {
    transport: Arc<T>,
    query: Arc<Q>,
}

impl<T: Transport, Q: DocumentQuery> RequestIssuer<T, Q> {
    /// Creates a new issuer over a transport and a document-query engine.
    pub const fn new(transport: Arc<T>, query: Arc<Q>) -> Self {
        Self { transport, query }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issues a GET request; `params` become the query string.
    pub async fn get(
        &self,
        url: &str,
        params: Option<&ParameterSet>,
        headers: Option<&HeaderSet>,
        ctx: &impl TestContext,
    ) -> TestResponse<Q> {
        self.issue(HttpMethod::Get, url, params, headers, ctx).await
    }

    /// Issues a POST request; `params` become a form-encoded body.
    pub async fn post(
        &self,
        url: &str,
        params: Option<&ParameterSet>,
        headers: Option<&HeaderSet>,
        ctx: &impl TestContext,
    ) -> TestResponse<Q> {
        self.issue(HttpMethod::Post, url, params, headers, ctx).await
    }

    /// Issues a request with the given method.
    ///
    /// A request that cannot be built, or that the transport cannot
    /// complete, is reported to `ctx` and yields an unanswered wrapper.
    pub async fn issue(
        &self,
        method: HttpMethod,
        url: &str,
        params: Option<&ParameterSet>,
        headers: Option<&HeaderSet>,
        ctx: &impl TestContext,
    ) -> TestResponse<Q> {
        let request = match OutgoingRequest::build(method, url, params, headers) {
            Ok(request) => request,
            Err(e) => {
                ctx.report(&AssertionFailure::InvalidRequest {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
                let request = OutgoingRequest {
                    method,
                    url: url.to_string(),
                    headers: Vec::new(),
                    body: None,
                };
                return TestResponse::unanswered(request, Arc::clone(&self.query));
            }
        };

        match self.transport.send(&request).await {
            Ok(received) => {
                tracing::debug!(
                    %method,
                    url = %request.url,
                    status = received.head.status.as_u16(),
                    "request issued"
                );
                TestResponse::new(request, received, Arc::clone(&self.query))
            }
            Err(e) => {
                ctx.report(&AssertionFailure::Transport {
                    url: request.url.clone(),
                    reason: e.to_string(),
                });
                TestResponse::unanswered(request, Arc::clone(&self.query))
            }
        }
    }
}
