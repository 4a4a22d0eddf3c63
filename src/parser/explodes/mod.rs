//! Link decoders, one per scheme, plus the subscription dispatcher.

pub mod common;
pub mod ss;
pub mod trojan;
pub mod vless;
pub mod vmess;

use thiserror::Error;

pub use common::{explode, explode_sub, parse_subscription};

/// Reason a single link could not be turned into a node.
#[derive(Error, Debug)]
pub enum ExplodeError {
    #[error("unsupported link scheme")]
    UnsupportedScheme,

    #[error("payload is not valid base64-encoded UTF-8")]
    InvalidBase64,

    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("malformed user info")]
    MalformedUserInfo,
}

/// Parses a port written as text.
pub(crate) fn parse_port(port: &str) -> Result<u16, ExplodeError> {
    port.trim()
        .parse::<u16>()
        .map_err(|_| ExplodeError::InvalidPort(port.to_string()))
}
