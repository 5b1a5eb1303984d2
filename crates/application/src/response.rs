//! Test response wrapper.
//!
//! Pairs an issued request with what came back and runs soft assertions
//! against it. Failures are reported to the caller's [`TestContext`] and
//! never abort the test.

use std::sync::Arc;

use probe_domain::{Assertion, AssertionFailure, OutgoingRequest, ResponseHead, same_target};

use crate::ports::{BodyStream, DocumentQuery, ReceivedResponse, TestContext};

/// The subject of response assertions.
///
/// The body is a single-read resource: whichever of
/// [`assert_contains`](Self::assert_contains) and
/// [`assert_selector`](Self::assert_selector) runs first consumes it, and
/// any later body assertion sees an empty body.
#[derive(Debug)]
pub struct TestResponse<Q: DocumentQuery> {
    request: OutgoingRequest,
    head: Option<ResponseHead>,
    body: BodyStream,
    query: Arc<Q>,
}

impl<Q: DocumentQuery> TestResponse<Q> {
    /// Wraps a received response.
    #[must_use]
    pub fn new(request: OutgoingRequest, received: ReceivedResponse, query: Arc<Q>) -> Self {
        Self {
            request,
            head: Some(received.head),
            body: received.body,
            query,
        }
    }

    /// Wraps a request that never received a response.
    #[must_use]
    pub const fn unanswered(request: OutgoingRequest, query: Arc<Q>) -> Self {
        Self {
            request,
            head: None,
            body: BodyStream::empty(),
            query,
        }
    }

    /// The URL that was requested, including any query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// The issued request.
    #[must_use]
    pub const fn request(&self) -> &OutgoingRequest {
        &self.request
    }

    /// Status and headers of the response, if one was received.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseHead> {
        self.head.as_ref()
    }

    /// Numeric status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.head.as_ref().map(|h| h.status.as_u16())
    }

    /// Returns true if the transport delivered a response.
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.head.is_some()
    }

    /// Returns true once a body assertion has read the body.
    #[must_use]
    pub const fn is_body_consumed(&self) -> bool {
        self.body.is_consumed()
    }

    /// Asserts that the response redirects to `expected`.
    ///
    /// The `Location` header is resolved against the request URL and compared
    /// with `expected` as a URL, so `/target` matches `http://host/target`
    /// and `https://host` matches `https://host/`.
    pub fn assert_redirected_to(&mut self, expected: &str, ctx: &impl TestContext) -> &mut Self {
        let failures = match &self.head {
            None => vec![self.no_response()],
            Some(head) => match head.location(&self.request.url) {
                Err(_) => vec![AssertionFailure::NotRedirect {
                    status: head.status,
                }],
                Ok(location) if !same_target(&location, expected) => {
                    vec![AssertionFailure::RedirectMismatch {
                        actual: location.to_string(),
                        expected: expected.to_string(),
                    }]
                }
                Ok(_) => Vec::new(),
            },
        };

        let assertion = Assertion::RedirectedTo {
            expected: expected.to_string(),
        };
        self.record(&assertion, &failures, ctx)
    }

    /// Asserts that the response body contains `text`.
    ///
    /// The body is searched for `text`. Older versions of this helper
    /// checked the reverse (that `text` contained the whole body); the two
    /// only agree when the body and the text are equal.
    pub async fn assert_contains(&mut self, text: &str, ctx: &impl TestContext) -> &mut Self {
        let failures = match self.read_body().await {
            Err(failure) => vec![failure],
            Ok(body) if String::from_utf8_lossy(&body).contains(text) => Vec::new(),
            Ok(_) => vec![AssertionFailure::MissingText {
                text: text.to_string(),
            }],
        };

        let assertion = Assertion::Contains {
            text: text.to_string(),
        };
        self.record(&assertion, &failures, ctx)
    }

    /// Asserts that the response document matches a selector expression.
    ///
    /// The expression is split on whitespace into simple selectors
    /// (`div.content span#test`), each matched among the descendants of the
    /// previous one. Every malformed token is reported.
    pub async fn assert_selector(&mut self, expression: &str, ctx: &impl TestContext) -> &mut Self {
        let failures = match self.read_body().await {
            Err(failure) => vec![failure],
            Ok(body) => self.match_selector(&body, expression),
        };

        let assertion = Assertion::Selector {
            expression: expression.to_string(),
        };
        self.record(&assertion, &failures, ctx)
    }

    /// Asserts that the response has status `expected`.
    pub fn assert_code(&mut self, expected: u16, ctx: &impl TestContext) -> &mut Self {
        let failures = match &self.head {
            None => vec![self.no_response()],
            Some(head) if head.status.as_u16() != expected => {
                vec![AssertionFailure::CodeMismatch {
                    expected,
                    actual: head.status.as_u16(),
                }]
            }
            Some(_) => Vec::new(),
        };

        self.record(&Assertion::Code { expected }, &failures, ctx)
    }

    async fn read_body(&mut self) -> Result<Vec<u8>, AssertionFailure> {
        if self.head.is_none() {
            return Err(self.no_response());
        }

        self.body.read_to_end().await.map_err(|e| {
            tracing::debug!(error = %e, url = %self.request.url, "response body read failed");
            AssertionFailure::Unreadable {
                url: self.request.url.clone(),
            }
        })
    }

    fn match_selector(&self, body: &[u8], expression: &str) -> Vec<AssertionFailure> {
        let unparseable = || AssertionFailure::Unparseable {
            url: self.request.url.clone(),
        };

        let Ok(source) = std::str::from_utf8(body) else {
            return vec![unparseable()];
        };
        let document = match self.query.parse(source) {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!(error = %e, url = %self.request.url, "document parse failed");
                return vec![unparseable()];
            }
        };

        let tokens: Vec<&str> = expression.split_whitespace().collect();
        if tokens.is_empty() {
            return vec![AssertionFailure::BadSelector {
                token: String::new(),
            }];
        }

        // Resolve every token so each malformed one is reported.
        let mut failures = Vec::new();
        let mut queries = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.query.resolve(token) {
                Ok(query) => queries.push(query),
                Err(e) => {
                    tracing::debug!(error = %e, "selector token rejected");
                    failures.push(AssertionFailure::BadSelector {
                        token: token.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() && self.query.apply(&document, &queries) == 0 {
            failures.push(AssertionFailure::SelectorNotFound {
                selector: expression.to_string(),
            });
        }

        failures
    }

    fn no_response(&self) -> AssertionFailure {
        AssertionFailure::NoResponse {
            url: self.request.url.clone(),
        }
    }

    fn record(
        &mut self,
        assertion: &Assertion,
        failures: &[AssertionFailure],
        ctx: &impl TestContext,
    ) -> &mut Self {
        tracing::debug!(
            assertion = %assertion.description(),
            url = %self.request.url,
            passed = failures.is_empty(),
            body_consumed = assertion.reads_body() && self.body.is_consumed(),
            "assertion checked"
        );
        for failure in failures {
            ctx.report(failure);
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use crate::test_support::{Broken, RecordingContext, StubQuery};
    use pretty_assertions::assert_eq;
    use probe_domain::HttpMethod;

    fn request(url: &str) -> OutgoingRequest {
        OutgoingRequest::build(HttpMethod::Get, url, None, None).unwrap()
    }

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> TestResponse<StubQuery> {
        let head = ResponseHead::new(
            status,
            headers
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        let received = ReceivedResponse {
            head,
            body: BodyStream::from_bytes(body),
        };
        TestResponse::new(request("http://127.0.0.1:9000/start"), received, Arc::new(StubQuery))
    }

    #[test]
    fn test_assert_code() {
        let ctx = RecordingContext::default();
        let mut tr = response(404, &[], "");

        tr.assert_code(404, &ctx);
        assert!(ctx.messages().is_empty());

        tr.assert_code(200, &ctx);
        assert_eq!(
            ctx.messages(),
            vec!["Invalid response code. Expected 200, Received 404".to_string()]
        );
    }

    #[test]
    fn test_assert_redirected_to() {
        let ctx = RecordingContext::default();
        let mut tr = response(302, &[("Location", "/hello_world")], "");

        tr.assert_redirected_to("http://127.0.0.1:9000/hello_world", &ctx);
        assert!(ctx.messages().is_empty());

        tr.assert_redirected_to("http://127.0.0.1:9000/other", &ctx);
        assert_eq!(ctx.messages().len(), 1);
        assert!(ctx.messages()[0].starts_with("Redirect not matched"));
    }

    #[test]
    fn test_assert_redirected_to_bare_origin() {
        let ctx = RecordingContext::default();
        let mut tr = response(302, &[("Location", "https://example.com")], "");

        tr.assert_redirected_to("https://example.com", &ctx)
            .assert_redirected_to("https://example.com/", &ctx);
        assert!(ctx.messages().is_empty());
    }

    #[test]
    fn test_assert_redirected_to_without_location() {
        let ctx = RecordingContext::default();
        let mut tr = response(200, &[], "");

        tr.assert_redirected_to("http://127.0.0.1:9000/", &ctx);
        assert_eq!(
            ctx.messages(),
            vec!["Response not a redirect: 200 OK".to_string()]
        );
    }

    #[tokio::test]
    async fn test_assert_contains() {
        let ctx = RecordingContext::default();
        response(200, &[], "Hello World")
            .assert_contains("World", &ctx)
            .await;
        assert!(ctx.messages().is_empty());

        response(200, &[], "Hello World")
            .assert_contains("Goodbye", &ctx)
            .await;
        assert_eq!(
            ctx.messages(),
            vec!["Response body does not contain Goodbye".to_string()]
        );
    }

    #[tokio::test]
    async fn test_body_is_consumed_by_first_assertion() {
        let ctx = RecordingContext::default();
        let mut tr = response(200, &[], "Hello World");

        tr.assert_contains("Hello", &ctx).await;
        assert!(tr.is_body_consumed());
        tr.assert_contains("Hello", &ctx).await;

        assert_eq!(ctx.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_body() {
        let ctx = RecordingContext::default();
        let received = ReceivedResponse {
            head: ResponseHead::new(200, Vec::new()),
            body: BodyStream::new(Broken(TransportError::BodyRead("reset".to_string()))),
        };
        let mut tr = TestResponse::new(request("http://localhost/"), received, Arc::new(StubQuery));

        tr.assert_contains("anything", &ctx).await;
        assert_eq!(
            ctx.messages(),
            vec!["Response not readable: http://localhost/".to_string()]
        );
    }

    #[tokio::test]
    async fn test_selector_tokens_are_all_resolved() {
        let ctx = RecordingContext::default();
        response(200, &[], "<div>")
            .assert_selector("bad! div also!bad", &ctx)
            .await;

        assert_eq!(
            ctx.messages(),
            vec![
                "Problem with selector: bad!".to_string(),
                "Problem with selector: also!bad".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_selector_match_and_miss() {
        let ctx = RecordingContext::default();
        response(200, &[], "div span")
            .assert_selector("div  span", &ctx)
            .await;
        assert!(ctx.messages().is_empty());

        response(200, &[], "div span")
            .assert_selector("table", &ctx)
            .await;
        assert_eq!(ctx.messages(), vec!["Selector not found: table".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_selector_expression() {
        let ctx = RecordingContext::default();
        response(200, &[], "div").assert_selector("   ", &ctx).await;
        assert_eq!(ctx.messages(), vec!["Problem with selector: ".to_string()]);
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_unparseable() {
        let ctx = RecordingContext::default();
        let received = ReceivedResponse {
            head: ResponseHead::new(200, Vec::new()),
            body: BodyStream::from_bytes(vec![0xff, 0xfe]),
        };
        let mut tr = TestResponse::new(request("http://localhost/"), received, Arc::new(StubQuery));

        tr.assert_selector("div", &ctx).await;
        assert_eq!(
            ctx.messages(),
            vec!["Could not parse response: http://localhost/".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unanswered_reports_each_assertion() {
        let ctx = RecordingContext::default();
        let mut tr = TestResponse::unanswered(request("http://localhost/"), Arc::new(StubQuery));

        tr.assert_code(200, &ctx)
            .assert_redirected_to("http://localhost/x", &ctx)
            .assert_contains("x", &ctx)
            .await
            .assert_selector("div", &ctx)
            .await;

        assert!(!tr.is_answered());
        assert_eq!(ctx.messages().len(), 4);
        assert!(
            ctx.messages()
                .iter()
                .all(|m| m == "No response received: http://localhost/")
        );
    }
}
