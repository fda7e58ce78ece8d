//! Block kinds: the PEM labels this crate understands.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::{Error, Result};

const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// A recognized PEM block label.
///
/// A kind is both the label a block is framed with and the key its decoded
/// primitive is stored under in a [`Store`](crate::Store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockKind {
    /// `PRIVATE KEY`: a private key whose format the label does not assert
    GenericPrivateKey,
    /// `PUBLIC KEY`: X.509 SubjectPublicKeyInfo
    PublicKey,
    /// `RSA PRIVATE KEY`: PKCS#1 RSA private key
    RsaPrivateKey,
    /// `EC PRIVATE KEY`: SEC1 EC private key
    EcPrivateKey,
    /// `CERTIFICATE`: X.509 certificate
    Certificate,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::GenericPrivateKey,
        BlockKind::PublicKey,
        BlockKind::RsaPrivateKey,
        BlockKind::EcPrivateKey,
        BlockKind::Certificate,
    ];

    /// Returns the PEM label of this kind.
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::GenericPrivateKey => PRIVATE_KEY_LABEL,
            BlockKind::PublicKey => PUBLIC_KEY_LABEL,
            BlockKind::RsaPrivateKey => RSA_PRIVATE_KEY_LABEL,
            BlockKind::EcPrivateKey => EC_PRIVATE_KEY_LABEL,
            BlockKind::Certificate => CERTIFICATE_LABEL,
        }
    }

    /// Maps a label to its kind. Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBlockKind`] for any other label.
    pub fn classify(label: &str) -> Result<Self> {
        match label {
            PRIVATE_KEY_LABEL => Ok(BlockKind::GenericPrivateKey),
            PUBLIC_KEY_LABEL => Ok(BlockKind::PublicKey),
            RSA_PRIVATE_KEY_LABEL => Ok(BlockKind::RsaPrivateKey),
            EC_PRIVATE_KEY_LABEL => Ok(BlockKind::EcPrivateKey),
            CERTIFICATE_LABEL => Ok(BlockKind::Certificate),
            _ => Err(Error::UnknownBlockKind(label.to_string())),
        }
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BlockKind::classify(s)
    }
}
