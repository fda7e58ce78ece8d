use der::asn1::ObjectIdentifier;
use thiserror::Error;

use crate::kind::BlockKind;

/// Errors returned by the per-format parsers and serializers.
///
/// These never reach the caller on their own: decoding wraps them in
/// [`Error::EncodingMismatch`] and encoding in [`Error::EncodingFailed`].
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("PKCS#1: {0}")]
    Pkcs1(#[from] pkcs1::Error),

    #[error("PKCS#8: {0}")]
    Pkcs8(#[from] pkcs8::Error),

    #[error("SubjectPublicKeyInfo: {0}")]
    Spki(#[from] spki::Error),

    #[error("DER: {0}")]
    Der(#[from] der::Error),

    #[error("EC key: {0}")]
    EllipticCurve(#[from] elliptic_curve::Error),

    #[error("RSA key: {0}")]
    Rsa(#[from] rsa::Error),

    /// The algorithm OID is neither rsaEncryption nor id-ecPublicKey
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(ObjectIdentifier),

    /// The named curve is not one of the supported NIST curves
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(ObjectIdentifier),

    /// An EC key carries no named curve and its length matches none
    #[error("cannot determine the curve of an EC key")]
    MissingCurve,
}

/// Errors returned by decoding, loading, encoding and key generation.
#[derive(Debug, Error)]
pub enum Error {
    /// The PEM armor itself is broken
    #[error("malformed PEM: {0}")]
    MalformedFraming(#[from] pem::Error),

    /// A block label outside the recognized set
    #[error("encountered unknown block type {0}")]
    UnknownBlockKind(String),

    /// A block whose label makes a specific claim failed every parser for it
    #[error("{kind} block does not match its encoding: {source}")]
    EncodingMismatch {
        kind: BlockKind,
        #[source]
        source: FormatError,
    },

    /// A source at `position` has a shape that cannot be read
    #[error("unsupported source at position {position}: not a regular file")]
    UnsupportedSource { position: usize },

    /// The encoder has no mapping for this primitive
    #[error("cannot encode {0} as PEM")]
    UnsupportedPrimitive(&'static str),

    /// Reading the source at `position` failed
    #[error("failed to read source at position {position}: {source}")]
    Io {
        position: usize,
        #[source]
        source: std::io::Error,
    },

    /// A serializer failed on a primitive that has a mapping
    #[error("failed to serialize key: {0}")]
    EncodingFailed(#[source] FormatError),

    /// A store entry holds a primitive that does not belong under its kind
    #[error("expected a private key under {kind}, found {found}")]
    KindMismatch {
        kind: BlockKind,
        found: &'static str,
    },

    #[error("invalid key length: {0}")]
    InvalidKeyLength(usize),

    #[error("unknown curve {0:?}")]
    UnknownCurve(String),

    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] rsa::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
