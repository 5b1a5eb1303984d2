//! Outgoing request construction

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::{HeaderSet, HttpMethod, ParameterSet};
use crate::error::{DomainError, DomainResult};

/// Content type forced onto every POST request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A fully built request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL, including any encoded query string.
    pub url: String,
    /// Headers in the order they are applied.
    pub headers: Vec<(String, String)>,
    /// Encoded request body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl OutgoingRequest {
    /// Builds a request from caller-supplied parameters and headers.
    ///
    /// GET parameters are appended to the URL as a query string. POST
    /// parameters become a form-encoded body, and every POST carries
    /// `Content-Type: application/x-www-form-urlencoded`, replacing any
    /// content type the caller supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or the parameters cannot be encoded.
    pub fn build(
        method: HttpMethod,
        url: &str,
        params: Option<&ParameterSet>,
        headers: Option<&HeaderSet>,
    ) -> DomainResult<Self> {
        if url.trim().is_empty() {
            return Err(DomainError::InvalidUrl("URL is required".to_string()));
        }

        let encoded = match params {
            Some(params) if !params.is_empty() => Some(params.encode()?),
            _ => None,
        };

        let (url, body) = match (method, encoded) {
            (HttpMethod::Get, Some(query)) => (append_query(url, &query), None),
            (HttpMethod::Get, None) => (url.to_string(), None),
            (HttpMethod::Post, body) => (url.to_string(), body),
        };

        let mut request = Self {
            method,
            url,
            headers: headers
                .map(|h| {
                    h.iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            body,
        };

        if method.has_body() {
            request.set_header("Content-Type", FORM_CONTENT_TYPE);
        }

        Ok(request)
    }

    /// Sets a header, dropping every existing header with the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// Returns the value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Decodes the query string of the request URL.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .split_once('?')
            .map(|(_, query)| {
                form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn append_query(url: &str, query: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_appends_query_string() {
        let params = ParameterSet::from([("a", "Hello"), ("b", "two words")]);
        let request =
            OutgoingRequest::build(HttpMethod::Get, "http://localhost/x", Some(&params), None)
                .unwrap();

        assert_eq!(request.url, "http://localhost/x?a=Hello&b=two+words");
        assert_eq!(request.body(), None);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("a".to_string(), "Hello".to_string()),
                ("b".to_string(), "two words".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_extends_existing_query() {
        let params = ParameterSet::new().with("b", "2");
        let request =
            OutgoingRequest::build(HttpMethod::Get, "http://localhost/?a=1", Some(&params), None)
                .unwrap();

        assert_eq!(request.url, "http://localhost/?a=1&b=2");
    }

    #[test]
    fn test_get_without_params_keeps_url() {
        let request =
            OutgoingRequest::build(HttpMethod::Get, "http://localhost/x", None, None).unwrap();
        assert_eq!(request.url, "http://localhost/x");
        assert!(request.header("content-type").is_none());
    }

    #[test]
    fn test_post_encodes_body_and_forces_content_type() {
        let params = ParameterSet::new().with("a", "Hello");
        let headers = HeaderSet::new()
            .with("content-type", "application/json")
            .with("b", "World");
        let request = OutgoingRequest::build(
            HttpMethod::Post,
            "http://localhost/x",
            Some(&params),
            Some(&headers),
        )
        .unwrap();

        assert_eq!(request.url, "http://localhost/x");
        assert_eq!(request.body(), Some("a=Hello"));
        assert_eq!(request.header("Content-Type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(request.header("b"), Some("World"));
        assert_eq!(
            request
                .headers
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
                .count(),
            1
        );
    }

    #[test]
    fn test_post_without_params_still_sets_content_type() {
        let request =
            OutgoingRequest::build(HttpMethod::Post, "http://localhost/x", None, None).unwrap();
        assert_eq!(request.body(), None);
        assert_eq!(request.header("content-type"), Some(FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_get_keeps_caller_content_type() {
        let headers = HeaderSet::new().with("Content-Type", "text/plain");
        let request =
            OutgoingRequest::build(HttpMethod::Get, "http://localhost/", None, Some(&headers))
                .unwrap();
        assert_eq!(request.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn test_header_spellings_collapse_to_one() {
        let headers = HeaderSet::new().with("X-A", "1").with("x-a", "2");
        let request =
            OutgoingRequest::build(HttpMethod::Get, "http://localhost/", None, Some(&headers))
                .unwrap();

        assert_eq!(request.headers, vec![("x-a".to_string(), "2".to_string())]);
        assert_eq!(request.header("X-A"), headers.get("X-A"));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = OutgoingRequest::build(HttpMethod::Get, "  ", None, None);
        assert!(matches!(result, Err(DomainError::InvalidUrl(_))));
    }
}
