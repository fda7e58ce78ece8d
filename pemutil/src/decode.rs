//! Block decoding: the private-key fallback decoder, the per-kind
//! dispatcher and the decode loop that drives them.
//!
//! Labels make claims of different strength. `PRIVATE KEY` and `PUBLIC KEY`
//! are generic, so a block carrying either label that does not parse is kept
//! as raw bytes. `RSA PRIVATE KEY`, `EC PRIVATE KEY` and `CERTIFICATE` assert
//! a format, so a parse failure aborts the decode.

use der::Decode;
use pem::Pem;
use pkcs1::DecodeRsaPrivateKey;
use pkcs8::{DecodePrivateKey, PrivateKeyInfo};
use rsa::RsaPrivateKey;
use tracing::{debug, warn};
use x509_cert::Certificate;

use crate::error::{Error, FormatError, Result};
use crate::kind::BlockKind;
use crate::primitive::{
    Curve, EcPrivateKey, OID_EC_PUBLIC_KEY, OID_RSA_ENCRYPTION, Primitive, PrivateKey, PublicKey,
};
use crate::store::Store;

/// Decodes a private key of unknown format.
///
/// PKCS#1 is tried first, then PKCS#8 (RSA, or EC on P-224, P-256, P-384
/// and P-521). When both fail the PKCS#8 error is returned.
pub fn decode_private_key(bytes: &[u8]) -> std::result::Result<PrivateKey, FormatError> {
    match RsaPrivateKey::from_pkcs1_der(bytes) {
        Ok(key) => return Ok(PrivateKey::Rsa(key)),
        Err(e) => debug!("not a PKCS#1 private key ({}), trying PKCS#8", e),
    }
    decode_pkcs8(bytes)
}

fn decode_pkcs8(bytes: &[u8]) -> std::result::Result<PrivateKey, FormatError> {
    let info = PrivateKeyInfo::from_der(bytes)?;
    let (algorithm, parameters) = info.algorithm.oids()?;
    if algorithm == OID_RSA_ENCRYPTION {
        return Ok(PrivateKey::Rsa(RsaPrivateKey::from_pkcs8_der(bytes)?));
    }
    if algorithm != OID_EC_PUBLIC_KEY {
        return Err(FormatError::UnsupportedAlgorithm(algorithm));
    }
    let oid = parameters.ok_or(FormatError::MissingCurve)?;
    let curve = Curve::from_oid(oid).ok_or(FormatError::UnsupportedCurve(oid))?;
    Ok(PrivateKey::Ec(EcPrivateKey::from_pkcs8_der(bytes, curve)?))
}

/// Decodes one framed block and stores the result in `store`.
///
/// Keys from `PRIVATE KEY` and `RSA PRIVATE KEY` blocks are stored under
/// [`BlockKind::RsaPrivateKey`], except PKCS#8 EC keys, which go under
/// [`BlockKind::EcPrivateKey`].
///
/// # Errors
///
/// - [`Error::UnknownBlockKind`] if the label is not recognized.
/// - [`Error::EncodingMismatch`] if an `RSA PRIVATE KEY`, `EC PRIVATE KEY`
///   or `CERTIFICATE` block does not parse.
///
/// On error `store` is left unchanged.
pub fn dispatch(store: &mut Store, block: &Pem) -> Result<()> {
    let kind = BlockKind::classify(block.label())?;
    let bytes = block.contents();
    debug!(%kind, len = bytes.len(), "dispatching block");

    match kind {
        BlockKind::GenericPrivateKey => match decode_private_key(bytes) {
            Ok(key) => store.insert(key.kind(), key.into()),
            Err(e) => {
                warn!(%kind, "keeping undecodable block as raw bytes: {}", e);
                store.insert(kind, Primitive::Raw(bytes.to_vec()));
            }
        },
        BlockKind::PublicKey => match PublicKey::from_spki_der(bytes) {
            Ok(key) => store.insert(kind, Primitive::PublicKey(key)),
            Err(e) => {
                warn!(%kind, "keeping undecodable block as raw bytes: {}", e);
                store.insert(kind, Primitive::Raw(bytes.to_vec()));
            }
        },
        BlockKind::RsaPrivateKey => {
            let key = decode_private_key(bytes)
                .map_err(|source| Error::EncodingMismatch { kind, source })?;
            store.insert(key.kind(), key.into());
        }
        BlockKind::EcPrivateKey => {
            let key = EcPrivateKey::from_sec1_der(bytes)
                .map_err(|source| Error::EncodingMismatch { kind, source })?;
            store.insert(kind, Primitive::EcPrivateKey(key));
        }
        BlockKind::Certificate => {
            let cert = Certificate::from_der(bytes).map_err(|e| Error::EncodingMismatch {
                kind,
                source: e.into(),
            })?;
            store.insert(kind, Primitive::Certificate(Box::new(cert)));
        }
    }
    Ok(())
}

/// Decodes every block in `bytes` into `store`, in input order.
///
/// Stops at the first fatal error. Blocks dispatched before it stay in
/// `store`. Empty or whitespace-only input is not an error.
pub fn decode(store: &mut Store, bytes: &[u8]) -> Result<()> {
    let text = std::str::from_utf8(bytes).map_err(|_| pem::Error::InvalidUtf8)?;
    for block in pem::blocks(text) {
        dispatch(store, &block?)?;
    }
    Ok(())
}
