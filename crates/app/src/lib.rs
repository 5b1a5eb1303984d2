//! Probe - functional testing against a running HTTP server
//!
//! Issue a GET or POST and run soft assertions on what came back. A failed
//! assertion is recorded on the test context and the test keeps going.
//!
//! ```ignore
//! use probe::{FailureLog, ParameterSet};
//!
//! let log = FailureLog::new();
//! let params = ParameterSet::new().with("q", "rust");
//!
//! probe::get("http://localhost:8080/search", Some(&params), None, &log)
//!     .await
//!     .assert_code(200, &log)
//!     .assert_selector("ul.results li", &log)
//!     .await;
//!
//! log.finish();
//! ```

use std::sync::Arc;

use probe_application::RequestIssuer;
use probe_domain::{AssertionFailure, HttpMethod, OutgoingRequest};
use thiserror::Error;

pub use probe_application::{TestContext, TransportError};
pub use probe_domain::{HeaderSet, ParameterSet, ResponseHead, StatusCode};
pub use probe_infrastructure::{
    ConfigError, FailureLog, ReqwestTransport, ScraperDocumentQuery, TransportConfig,
    init_tracing,
};

/// Response wrapper returned by [`Probe`], [`get`] and [`post`].
pub type TestResponse = probe_application::TestResponse<ScraperDocumentQuery>;

/// Errors building a [`Probe`].
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A `PROBE_*` setting is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Request issuer wired with the reqwest transport and HTML selectors.
pub struct Probe {
    issuer: RequestIssuer<ReqwestTransport, ScraperDocumentQuery>,
}

impl Probe {
    /// Creates a probe configured from `PROBE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is invalid or the HTTP client cannot be
    /// created.
    pub fn new() -> Result<Self, ProbeError> {
        let config = TransportConfig::from_env()?;
        Ok(Self::from_config(&config)?)
    }

    /// Creates a probe configured through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is invalid or the HTTP client cannot be
    /// created.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProbeError> {
        let config = TransportConfig::from_lookup(lookup)?;
        Ok(Self::from_config(&config)?)
    }

    /// Creates a probe from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &TransportConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self {
            issuer: RequestIssuer::new(Arc::new(transport), Arc::new(ScraperDocumentQuery)),
        })
    }

    /// Issues a GET request; `params` become the query string.
    pub async fn get(
        &self,
        url: &str,
        params: Option<&ParameterSet>,
        headers: Option<&HeaderSet>,
        ctx: &impl TestContext,
    ) -> TestResponse {
        self.issuer.get(url, params, headers, ctx).await
    }

    /// Issues a POST request; `params` become a form-encoded body.
    pub async fn post(
        &self,
        url: &str,
        params: Option<&ParameterSet>,
        headers: Option<&HeaderSet>,
        ctx: &impl TestContext,
    ) -> TestResponse {
        self.issuer.post(url, params, headers, ctx).await
    }
}

/// Issues a GET request with a fresh client configured from the environment.
pub async fn get(
    url: &str,
    params: Option<&ParameterSet>,
    headers: Option<&HeaderSet>,
    ctx: &impl TestContext,
) -> TestResponse {
    match Probe::new() {
        Ok(probe) => probe.get(url, params, headers, ctx).await,
        Err(e) => client_unavailable(HttpMethod::Get, url, &e, ctx),
    }
}

/// Issues a POST request with a fresh client configured from the environment.
pub async fn post(
    url: &str,
    params: Option<&ParameterSet>,
    headers: Option<&HeaderSet>,
    ctx: &impl TestContext,
) -> TestResponse {
    match Probe::new() {
        Ok(probe) => probe.post(url, params, headers, ctx).await,
        Err(e) => client_unavailable(HttpMethod::Post, url, &e, ctx),
    }
}

fn client_unavailable(
    method: HttpMethod,
    url: &str,
    error: &ProbeError,
    ctx: &impl TestContext,
) -> TestResponse {
    ctx.report(&AssertionFailure::Transport {
        url: url.to_string(),
        reason: error.to_string(),
    });
    let request = OutgoingRequest {
        method,
        url: url.to_string(),
        headers: Vec::new(),
        body: None,
    };
    TestResponse::unanswered(request, Arc::new(ScraperDocumentQuery))
}
