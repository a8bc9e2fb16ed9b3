use crate::config::VerifierConfig;
use crate::domain::notification::Notification;
use crate::domain::ports::VerificationTransportBox;
use crate::domain::verdict::Verdict;
use crate::error::{IpnError, Result};
use crate::infrastructure::https::HttpsTransport;
use reqwest::Url;

/// Confirms notifications with the processor.
///
/// `NotificationVerifier` echoes a notification's raw body back to the
/// configured endpoint and reads the processor's verdict. Its configuration is
/// frozen at construction, so one verifier can be shared across tasks.
pub struct NotificationVerifier {
    config: VerifierConfig,
    validation_url: Url,
    transport: VerificationTransportBox,
}

impl NotificationVerifier {
    /// Creates a verifier that talks to the endpoint over HTTPS.
    ///
    /// # Errors
    /// Fails if the endpoint is not a usable URL or the configured trust roots
    /// can't be loaded.
    pub fn new(config: VerifierConfig) -> Result<Self> {
        let validation_url = config.validation_url()?;
        let transport = HttpsTransport::new(&config)?;
        Ok(Self {
            config,
            validation_url,
            transport: Box::new(transport),
        })
    }

    /// Creates a verifier over a custom transport.
    ///
    /// # Errors
    /// Fails if the endpoint is not a usable URL.
    pub fn with_transport(
        config: VerifierConfig,
        transport: VerificationTransportBox,
    ) -> Result<Self> {
        let validation_url = config.validation_url()?;
        Ok(Self {
            config,
            validation_url,
            transport,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Asks the processor whether it sent `notification`.
    ///
    /// Returns `true` for `VERIFIED` and `false` for `INVALID`. Transport
    /// failures, non-2xx statuses and any other response body are errors,
    /// never a `false`.
    pub async fn verify(&self, notification: &Notification) -> Result<bool> {
        Ok(self.check(notification).await?.is_verified())
    }

    /// Like `verify`, but returns the typed verdict.
    pub async fn check(&self, notification: &Notification) -> Result<Verdict> {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            bytes = notification.raw().len(),
            "sending notification for validation"
        );

        let response = self
            .transport
            .post(self.validation_url.as_str(), notification.raw())
            .await?;
        if !(200..300).contains(&response.status) {
            return Err(IpnError::HttpStatus {
                status: response.status,
            });
        }

        let verdict = response.body.parse::<Verdict>()?;
        tracing::debug!(?verdict, "validation response received");
        Ok(verdict)
    }
}
