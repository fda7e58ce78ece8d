use base64::DecodeError;
use thiserror::Error;

/// Errors that can occur when parsing PEM text.
///
/// PEM parsing follows RFC 7468 and requires proper boundary markers,
/// valid base64 encoding, and matching labels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Missing the opening boundary marker (e.g., `-----BEGIN CERTIFICATE-----`)
    #[error("missing a pre encapsulation boundary")]
    MissingPreEncapsulationBoundary,

    /// Missing the closing boundary marker (e.g., `-----END CERTIFICATE-----`)
    #[error("missing a post encapsulation boundary")]
    MissingPostEncapsulationBoundary,

    /// The BEGIN and END labels do not match (e.g., BEGIN CERTIFICATE, END PRIVATE KEY)
    #[error("label doesn't match: BEGIN {begin}, END {end}")]
    LabelMissMatch { begin: String, end: String },

    /// A header line without a `:` separator
    #[error("invalid header line: {0}")]
    InvalidHeader(String),

    /// Blank line inside the base64 body
    #[error("invalid base64line")]
    InvalidBase64Line,

    /// Failed to decode base64 data
    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),

    /// Input bytes are not UTF-8 text
    #[error("PEM input is not valid UTF-8")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, Error>;
