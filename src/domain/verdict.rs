use crate::error::IpnError;
use serde::Serialize;
use std::str::FromStr;

/// The processor's answer to a validation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Verified,
    Invalid,
}

impl Verdict {
    pub const VERIFIED: &'static str = "VERIFIED";
    pub const INVALID: &'static str = "INVALID";

    pub fn is_verified(self) -> bool {
        self == Verdict::Verified
    }
}

/// Only the two exact tokens are accepted. Anything else, including the
/// tokens with surrounding whitespace, is a protocol violation.
impl FromStr for Verdict {
    type Err = IpnError;

    fn from_str(body: &str) -> Result<Self, Self::Err> {
        match body {
            Verdict::VERIFIED => Ok(Verdict::Verified),
            Verdict::INVALID => Ok(Verdict::Invalid),
            other => Err(IpnError::ProtocolViolation {
                body: other.to_string(),
            }),
        }
    }
}
