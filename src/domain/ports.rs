use crate::error::Result;
use async_trait::async_trait;

/// What came back from the verification endpoint, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a validation request to the processor.
///
/// Implementations must POST `body` unchanged to `url` and return the full
/// response body as text. Connection and TLS failures are errors; HTTP
/// status codes are reported in the response and judged by the caller.
#[async_trait]
pub trait VerificationTransport: Send + Sync {
    async fn post(&self, url: &str, body: &[u8]) -> Result<VerificationResponse>;
}

pub type VerificationTransportBox = Box<dyn VerificationTransport>;
