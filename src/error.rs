use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum IpnError {
    #[error("Missing field: {field}")]
    #[diagnostic(
        code(ipn::missing_field),
        help("the notification payload did not carry `{field}`")
    )]
    MissingField { field: &'static str },

    #[error("Invalid amount in {field}: {value:?}")]
    #[diagnostic(code(ipn::invalid_amount))]
    InvalidAmount { field: &'static str, value: String },

    #[error("Invalid timestamp: {value:?}")]
    #[diagnostic(code(ipn::invalid_timestamp))]
    InvalidTimestamp { value: String },

    #[error("Invalid verification endpoint {endpoint:?}: {reason}")]
    #[diagnostic(
        code(ipn::invalid_endpoint),
        help("the endpoint must be an absolute http or https URL")
    )]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Transport error: {0}")]
    #[diagnostic(
        code(ipn::transport),
        help("the verification endpoint could not be reached; this is not a verdict")
    )]
    Transport(String),

    #[error("HTTP {status} from verification endpoint")]
    #[diagnostic(code(ipn::http_status))]
    HttpStatus { status: u16 },

    #[error("Trust roots error: {0}")]
    #[diagnostic(code(ipn::trust_roots))]
    TrustRoots(String),

    #[error("Unexpected verification response: {body:?}")]
    #[diagnostic(
        code(ipn::protocol_violation),
        help("expected exactly VERIFIED or INVALID; check the endpoint URL")
    )]
    ProtocolViolation { body: String },
}

impl From<reqwest::Error> for IpnError {
    fn from(error: reqwest::Error) -> Self {
        // The underlying I/O or TLS cause lives in the source chain.
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        IpnError::Transport(message)
    }
}

pub type Result<T> = std::result::Result<T, IpnError>;
