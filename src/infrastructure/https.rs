use crate::config::{TrustRoots, VerifierConfig};
use crate::domain::ports::{VerificationResponse, VerificationTransport};
use crate::error::{IpnError, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Certificate;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Verification transport backed by `reqwest` over rustls.
///
/// Trust roots, timeout and user agent are fixed when the client is built.
#[derive(Clone)]
pub struct HttpsTransport {
    http: reqwest::Client,
}

impl HttpsTransport {
    /// Builds the HTTP client for `config`.
    ///
    /// Redirects are never followed: a 3xx reaches the caller as a status.
    ///
    /// # Errors
    /// Returns `TrustRoots` if a configured CA bundle can't be read or holds no
    /// certificates, and `Transport` if the client can't be constructed.
    pub fn new(config: &VerifierConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none());

        match &config.trust {
            TrustRoots::Bundled => {}
            TrustRoots::PemFile(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    IpnError::TrustRoots(format!("cannot read {}: {e}", path.display()))
                })?;
                builder = pin_roots(builder, &pem)?;
            }
            TrustRoots::Pem(pem) => {
                builder = pin_roots(builder, pem)?;
            }
            TrustRoots::DangerAcceptInvalidCerts => {
                tracing::warn!(
                    endpoint = %config.endpoint,
                    "TLS certificate verification is DISABLED for notification verification"
                );
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        let http = builder
            .build()
            .map_err(|e| IpnError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

/// Replaces the built-in roots with the certificates in `pem`.
fn pin_roots(builder: reqwest::ClientBuilder, pem: &[u8]) -> Result<reqwest::ClientBuilder> {
    let certs = Certificate::from_pem_bundle(pem)
        .map_err(|e| IpnError::TrustRoots(format!("invalid PEM bundle: {e}")))?;
    if certs.is_empty() {
        return Err(IpnError::TrustRoots(
            "CA bundle contains no certificates".to_string(),
        ));
    }

    tracing::debug!(count = certs.len(), "pinning verification endpoint trust roots");
    Ok(certs
        .into_iter()
        .fold(builder.tls_built_in_root_certs(false), |b, cert| {
            b.add_root_certificate(cert)
        }))
}

#[async_trait]
impl VerificationTransport for HttpsTransport {
    async fn post(&self, url: &str, body: &[u8]) -> Result<VerificationResponse> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(CONTENT_LENGTH, body.len())
            .body(body.to_vec())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(VerificationResponse { status, body })
    }
}
