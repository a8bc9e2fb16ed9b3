use crate::domain::ports::{VerificationResponse, VerificationTransport};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A request captured by `RecordingTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Vec<u8>,
}

/// An in-process transport that answers every request with a fixed response
/// and keeps a copy of what it was sent.
///
/// Useful for tests and dry runs where no network is available. Clones share
/// the same request log.
#[derive(Clone)]
pub struct RecordingTransport {
    response: VerificationResponse,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl RecordingTransport {
    /// Replies `200 OK` with `body`.
    pub fn replying(body: impl Into<String>) -> Self {
        Self::with_response(200, body)
    }

    pub fn with_response(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: VerificationResponse {
                status,
                body: body.into(),
            },
            requests: Arc::default(),
        }
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl VerificationTransport for RecordingTransport {
    async fn post(&self, url: &str, body: &[u8]) -> Result<VerificationResponse> {
        let mut requests = self.requests.write().await;
        requests.push(RecordedRequest {
            url: url.to_string(),
            body: body.to_vec(),
        });
        Ok(self.response.clone())
    }
}
