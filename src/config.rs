//! Verifier configuration.
//!
//! A `VerifierConfig` is built once and moved into a `NotificationVerifier`,
//! which never hands out mutable access to it. Defaults are named constants.

use crate::error::{IpnError, Result};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

/// Processor sandbox endpoint; the default target.
pub const SANDBOX_ENDPOINT: &str = "https://ipnpb.sandbox.paypal.com/cgi-bin/webscr";
/// Processor live endpoint.
pub const PRODUCTION_ENDPOINT: &str = "https://ipnpb.paypal.com/cgi-bin/webscr";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("ipn-verify/", env!("CARGO_PKG_VERSION"));

const VALIDATE_CMD: (&str, &str) = ("cmd", "_notify-validate");

/// Certificate authorities trusted when the endpoint is reached over TLS.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrustRoots {
    /// Root certificates bundled with the TLS stack.
    #[default]
    Bundled,
    /// A PEM bundle on disk. Only these certificates are trusted.
    PemFile(PathBuf),
    /// An in-memory PEM bundle. Only these certificates are trusted.
    Pem(Vec<u8>),
    /// No peer verification at all. Never use against a live endpoint.
    DangerAcceptInvalidCerts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    pub endpoint: String,
    pub trust: TrustRoots,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            endpoint: SANDBOX_ENDPOINT.to_string(),
            trust: TrustRoots::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl VerifierConfig {
    /// Configuration targeting `endpoint` with all other settings defaulted.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::default().with_endpoint(endpoint)
    }

    /// Configuration for the live processor endpoint.
    #[must_use]
    pub fn production() -> Self {
        Self::new(PRODUCTION_ENDPOINT)
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Trust only the certificates in the PEM file at `path`.
    #[must_use]
    pub fn with_ca_bundle_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.trust = TrustRoots::PemFile(path.into());
        self
    }

    /// Trust only the certificates in `pem`.
    #[must_use]
    pub fn with_ca_bundle_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.trust = TrustRoots::Pem(pem.into());
        self
    }

    /// Disable TLS peer verification (for local testing only!).
    #[must_use]
    pub fn danger_skip_tls_verification(mut self) -> Self {
        self.trust = TrustRoots::DangerAcceptInvalidCerts;
        self
    }

    /// The endpoint with the validation command appended to its query.
    ///
    /// Existing query pairs are kept and a fragment stays after the query.
    ///
    /// # Errors
    /// Returns `InvalidEndpoint` unless the endpoint is an absolute http(s) URL.
    pub fn validation_url(&self) -> Result<Url> {
        let invalid = |reason: String| IpnError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let mut url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
        }
        url.query_pairs_mut()
            .append_pair(VALIDATE_CMD.0, VALIDATE_CMD.1);
        Ok(url)
    }
}
