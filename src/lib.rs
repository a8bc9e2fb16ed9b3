pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::verifier::NotificationVerifier;
pub use config::{TrustRoots, VerifierConfig};
pub use domain::notification::Notification;
pub use domain::status::PaymentStatus;
pub use domain::verdict::Verdict;
pub use error::{IpnError, Result};
