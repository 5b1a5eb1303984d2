//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port using the reqwest library.
//! Redirects are never followed: a 3xx response is handed back as-is so
//! redirect assertions can inspect it.

use std::error::Error as _;
use std::future::Future;

use async_trait::async_trait;
use probe_application::{BodySource, BodyStream, ReceivedResponse, Transport, TransportError};
use probe_domain::{HttpMethod, OutgoingRequest, ResponseHead};
use reqwest::{Client, Method, Url, redirect};

use crate::config::TransportConfig;

/// HTTP transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport from configuration.
    ///
    /// The client never follows redirects and has no request timeout unless
    /// one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Self::redirect_policy());

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Stops at the first redirect. A stopped redirect is returned to the
    /// caller as the response itself, not as an error.
    fn redirect_policy() -> redirect::Policy {
        redirect::Policy::custom(|attempt| {
            tracing::debug!(
                status = attempt.status().as_u16(),
                location = %attempt.url(),
                "redirect not followed"
            );
            attempt.stop()
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout;
        }

        let message = error_chain(error);
        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return TransportError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return TransportError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return TransportError::ConnectionFailed(message);
        }

        TransportError::Other(message)
    }
}

/// Joins an error with all of its sources.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: &OutgoingRequest,
    ) -> impl Future<Output = Result<ReceivedResponse, TransportError>> + Send {
        // Clone what we need to move into the async block
        let method = request.method;
        let url = request.url.clone();
        let headers = request.headers.clone();
        let body = request.body.clone();

        async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| TransportError::InvalidUrl(format!("{e}: {url}")))?;

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url);

            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            if let Some(body) = body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

            let status = response.status().as_u16();
            let response_headers = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            Ok(ReceivedResponse {
                head: ResponseHead::new(status, response_headers),
                body: BodyStream::new(ReqwestBody(response)),
            })
        }
    }
}

/// Unread reqwest response body.
struct ReqwestBody(reqwest::Response);

#[async_trait]
impl BodySource for ReqwestBody {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
        self.0
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| TransportError::BodyRead(error_chain(&e)))
    }
}
