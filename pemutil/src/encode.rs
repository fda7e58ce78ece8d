//! Primitive to PEM encoding.

use pem::Pem;
use pkcs1::EncodeRsaPrivateKey;

use crate::error::{Error, FormatError, Result};
use crate::kind::BlockKind;
use crate::primitive::Primitive;

/// Frames a primitive as a PEM block.
///
/// | primitive          | label             | body                    |
/// |--------------------|-------------------|-------------------------|
/// | raw bytes          | `PRIVATE KEY`     | bytes as stored         |
/// | RSA private key    | `RSA PRIVATE KEY` | PKCS#1                  |
/// | EC private key     | `EC PRIVATE KEY`  | SEC1 with named curve   |
/// | public key         | `PUBLIC KEY`      | SubjectPublicKeyInfo    |
///
/// Raw bytes are always labeled `PRIVATE KEY`, including bytes kept from a
/// `PUBLIC KEY` block that did not decode.
///
/// # Errors
///
/// - [`Error::UnsupportedPrimitive`] for a certificate.
/// - [`Error::EncodingFailed`] if a serializer fails.
pub fn encode(primitive: &Primitive) -> Result<Pem> {
    let (kind, der) = match primitive {
        Primitive::Raw(bytes) => (BlockKind::GenericPrivateKey, bytes.clone()),
        Primitive::RsaPrivateKey(key) => {
            let document = key
                .to_pkcs1_der()
                .map_err(|e| Error::EncodingFailed(FormatError::Pkcs1(e)))?;
            (BlockKind::RsaPrivateKey, document.as_bytes().to_vec())
        }
        Primitive::EcPrivateKey(key) => (
            BlockKind::EcPrivateKey,
            key.to_sec1_der().map_err(Error::EncodingFailed)?,
        ),
        Primitive::PublicKey(key) => (
            BlockKind::PublicKey,
            key.to_spki_der().map_err(Error::EncodingFailed)?,
        ),
        Primitive::Certificate(_) => return Err(Error::UnsupportedPrimitive(primitive.name())),
    };
    Ok(Pem::new(kind.label(), der))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::store::Store;

    const RSA_PKCS1: &str = include_str!("../../testdata/rsa-pkcs1.pem");
    const RSA_PUBLIC: &str = include_str!("../../testdata/rsa-public.pem");
    const EC_P256: &str = include_str!("../../testdata/ec-p256.pem");
    const EC_P384: &str = include_str!("../../testdata/ec-p384.pem");
    const EC_P256_PUBLIC: &str = include_str!("../../testdata/ec-p256-public.pem");
    const CERT: &str = include_str!("../../testdata/cert.pem");

    #[rstest(
        input,
        kind,
        case(RSA_PKCS1, BlockKind::RsaPrivateKey),
        case(RSA_PUBLIC, BlockKind::PublicKey),
        case(EC_P256, BlockKind::EcPrivateKey),
        case(EC_P384, BlockKind::EcPrivateKey),
        case(EC_P256_PUBLIC, BlockKind::PublicKey)
    )]
    fn test_typed_round_trip(input: &str, kind: BlockKind) {
        let store = Store::load_bytes(input).unwrap();
        let pem = encode(store.get(kind).unwrap()).unwrap();
        assert_eq!(pem.label(), kind.label());

        let decoded = Store::load_bytes(pem.to_string()).unwrap();
        assert_eq!(decoded.get(kind), store.get(kind));
    }

    #[rstest(input, case(RSA_PUBLIC), case(EC_P256_PUBLIC))]
    fn test_der_matches_openssl(input: &str) {
        // OpenSSL emits the same DER for these encodings.
        let original: Pem = input.parse().unwrap();
        let store = Store::load_bytes(input).unwrap();
        let (_, primitive) = store.iter().next().unwrap();
        assert_eq!(encode(primitive).unwrap(), original);
    }

    #[test]
    fn test_raw_bytes_are_verbatim() {
        let pem = encode(&Primitive::Raw(vec![0xde, 0xad, 0xbe, 0xef])).unwrap();
        assert_eq!(pem.label(), "PRIVATE KEY");
        assert_eq!(pem.contents(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_raw_public_key_is_labeled_private() {
        let text = Pem::new("PUBLIC KEY", vec![1, 2, 3]).to_string();
        let store = Store::load_bytes(text).unwrap();
        let pem = encode(store.get(BlockKind::PublicKey).unwrap()).unwrap();
        assert_eq!(pem.label(), "PRIVATE KEY");
        assert_eq!(pem.contents(), &[1, 2, 3]);
    }

    #[test]
    fn test_certificate_is_unsupported() {
        let store = Store::load_bytes(CERT).unwrap();
        let err = encode(store.get(BlockKind::Certificate).unwrap()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPrimitive("certificate")));
    }
}
