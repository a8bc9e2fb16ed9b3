use serde::{Serialize, Serializer};
use std::fmt;

/// Payment status reported in the `payment_status` field.
///
/// The processor adds new values over time, so unknown statuses are kept
/// verbatim in `Other` instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Reversed,
    Refunded,
    Denied,
    CanceledReversal,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Reversed => "Reversed",
            PaymentStatus::Refunded => "Refunded",
            PaymentStatus::Denied => "Denied",
            PaymentStatus::CanceledReversal => "Canceled_Reversal",
            PaymentStatus::Other(value) => value,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "Completed" => PaymentStatus::Completed,
            "Pending" => PaymentStatus::Pending,
            "Failed" => PaymentStatus::Failed,
            "Reversed" => PaymentStatus::Reversed,
            "Refunded" => PaymentStatus::Refunded,
            "Denied" => PaymentStatus::Denied,
            "Canceled_Reversal" => PaymentStatus::CanceledReversal,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
