//! Test doubles shared by the unit tests of this crate.

use async_trait::async_trait;
use parking_lot::Mutex;
use probe_domain::{OutgoingRequest, ResponseHead};

use crate::ports::{
    BodySource, BodyStream, DocumentError, DocumentQuery, ReceivedResponse, TestContext,
    Transport, TransportError,
};

/// Collects reported messages.
#[derive(Default)]
pub struct RecordingContext {
    messages: Mutex<Vec<String>>,
}

impl RecordingContext {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl TestContext for RecordingContext {
    fn fail(&self, message: String) {
        self.messages.lock().push(message);
    }
}

/// Body source that always fails.
pub struct Broken(pub TransportError);

#[async_trait]
impl BodySource for Broken {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
        Err(self.0)
    }
}

/// Word-based document query: the document is the body split on
/// whitespace, a query is a word, and tokens containing `!` are malformed.
pub struct StubQuery;

impl DocumentQuery for StubQuery {
    type Document = Vec<String>;
    type Query = String;

    fn parse(&self, source: &str) -> Result<Self::Document, DocumentError> {
        Ok(source.split_whitespace().map(str::to_string).collect())
    }

    fn resolve(&self, token: &str) -> Result<Self::Query, DocumentError> {
        if token.contains('!') {
            return Err(DocumentError::InvalidSelector {
                token: token.to_string(),
                reason: "bang".to_string(),
            });
        }
        Ok(token.to_string())
    }

    fn apply(&self, document: &Self::Document, queries: &[Self::Query]) -> usize {
        if !queries.is_empty() && queries.iter().all(|q| document.contains(q)) {
            1
        } else {
            0
        }
    }
}

/// Transport returning a canned response and remembering what it was sent.
pub struct StubTransport {
    outcome: Result<(u16, Vec<(String, String)>, Vec<u8>), TransportError>,
    sent: Mutex<Vec<OutgoingRequest>>,
}

impl StubTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok((status, Vec::new(), body.as_bytes().to_vec())),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingRequest> {
        self.sent.lock().clone()
    }
}

impl Transport for StubTransport {
    fn send(
        &self,
        request: &OutgoingRequest,
    ) -> impl Future<Output = Result<ReceivedResponse, TransportError>> + Send {
        self.sent.lock().push(request.clone());
        let result = self
            .outcome
            .clone()
            .map(|(status, headers, body)| ReceivedResponse {
                head: ResponseHead::new(status, headers),
                body: BodyStream::from_bytes(body),
            });
        async move { result }
    }
}
