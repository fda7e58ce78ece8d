//! Typed crypto primitives held by a [`Store`](crate::Store).
//!
//! [`Primitive`] is a closed enum: each value is exactly one fully decoded
//! key or certificate, or the raw bytes of a block that could not be decoded.
//! Callers match on it instead of probing with casts.
//!
//! ```no_run
//! use pemutil::{BlockKind, Primitive, Store};
//!
//! let store = Store::load_file("server.pem").unwrap();
//! match store.get(BlockKind::RsaPrivateKey) {
//!     Some(Primitive::RsaPrivateKey(key)) => println!("RSA key: {:?}", key),
//!     Some(other) => println!("unexpected {}", other.name()),
//!     None => println!("no RSA key"),
//! }
//! ```

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use der::{Decode, Encode, asn1::ObjectIdentifier};
use elliptic_curve::{rand_core::CryptoRngCore, sec1::ToEncodedPoint, zeroize::Zeroizing};
use pkcs8::DecodePrivateKey;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey, traits::PublicKeyParts};
use spki::{DecodePublicKey, EncodePublicKey, SubjectPublicKeyInfoRef};
use x509_cert::Certificate;

use crate::error::{Error, FormatError};
use crate::kind::BlockKind;

/// rsaEncryption (RFC 8017)
pub(crate) const OID_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
/// id-ecPublicKey (RFC 5480)
pub(crate) const OID_EC_PUBLIC_KEY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

const OID_SECP224R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.33");
const OID_SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const OID_SECP521R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

/// Largest RSA modulus accepted in a `PUBLIC KEY` block, in bits. Matches
/// what the private key parsers accept.
const RSA_MAX_BITS: usize = 16384;

/// A NIST prime curve supported for EC keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    P224,
    P256,
    P384,
    P521,
}

impl Curve {
    pub fn name(&self) -> &'static str {
        match self {
            Curve::P224 => "P-224",
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    /// Returns the named curve OID (RFC 5480).
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Curve::P224 => OID_SECP224R1,
            Curve::P256 => OID_SECP256R1,
            Curve::P384 => OID_SECP384R1,
            Curve::P521 => OID_SECP521R1,
        }
    }

    pub fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        [Curve::P224, Curve::P256, Curve::P384, Curve::P521]
            .into_iter()
            .find(|curve| curve.oid() == oid)
    }

    /// Field size in bits.
    pub fn bits(&self) -> usize {
        match self {
            Curve::P224 => 224,
            Curve::P256 => 256,
            Curve::P384 => 384,
            Curve::P521 => 521,
        }
    }

    // length of a serialized private scalar
    fn from_scalar_len(len: usize) -> Option<Self> {
        match len {
            28 => Some(Curve::P224),
            32 => Some(Curve::P256),
            48 => Some(Curve::P384),
            66 => Some(Curve::P521),
            _ => None,
        }
    }
}

impl Display for Curve {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Curve {
    type Err = Error;

    /// Accepts `P256`, `P-256`, `prime256v1` and `secp256r1` (and the
    /// P-224, P-384 and P-521 equivalents), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p224" | "p-224" | "secp224r1" => Ok(Curve::P224),
            "p256" | "p-256" | "prime256v1" | "secp256r1" => Ok(Curve::P256),
            "p384" | "p-384" | "secp384r1" => Ok(Curve::P384),
            "p521" | "p-521" | "secp521r1" => Ok(Curve::P521),
            _ => Err(Error::UnknownCurve(s.to_string())),
        }
    }
}

/// Key algorithm of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    Ec(Curve),
}

impl Display for KeyAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyAlgorithm::Rsa => write!(f, "RSA"),
            KeyAlgorithm::Ec(curve) => write!(f, "EC {}", curve),
        }
    }
}

/// An EC private key on one of the supported curves.
#[derive(Debug, Clone, PartialEq)]
pub enum EcPrivateKey {
    P224(p224::SecretKey),
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl EcPrivateKey {
    /// Generates a new key on `curve`.
    pub fn random(curve: Curve, rng: &mut impl CryptoRngCore) -> Self {
        match curve {
            Curve::P224 => EcPrivateKey::P224(p224::SecretKey::random(rng)),
            Curve::P256 => EcPrivateKey::P256(p256::SecretKey::random(rng)),
            Curve::P384 => EcPrivateKey::P384(p384::SecretKey::random(rng)),
            Curve::P521 => EcPrivateKey::P521(p521::SecretKey::random(rng)),
        }
    }

    pub fn curve(&self) -> Curve {
        match self {
            EcPrivateKey::P224(_) => Curve::P224,
            EcPrivateKey::P256(_) => Curve::P256,
            EcPrivateKey::P384(_) => Curve::P384,
            EcPrivateKey::P521(_) => Curve::P521,
        }
    }

    pub fn public_key(&self) -> EcPublicKey {
        match self {
            EcPrivateKey::P224(key) => EcPublicKey::P224(key.public_key()),
            EcPrivateKey::P256(key) => EcPublicKey::P256(key.public_key()),
            EcPrivateKey::P384(key) => EcPublicKey::P384(key.public_key()),
            EcPrivateKey::P521(key) => EcPublicKey::P521(key.public_key()),
        }
    }

    /// Parses a SEC1 (RFC 5915) `ECPrivateKey`.
    ///
    /// The curve comes from the embedded named-curve parameter. Keys without
    /// one are matched by the length of the private scalar. An embedded
    /// public key is ignored; the public key is always derived from the
    /// scalar.
    pub fn from_sec1_der(bytes: &[u8]) -> Result<Self, FormatError> {
        let sec1_key = sec1::EcPrivateKey::from_der(bytes)?;
        let curve = match sec1_key.parameters.and_then(|p| p.named_curve()) {
            Some(oid) => Curve::from_oid(oid).ok_or(FormatError::UnsupportedCurve(oid))?,
            None => Curve::from_scalar_len(sec1_key.private_key.len())
                .ok_or(FormatError::MissingCurve)?,
        };
        let key = match curve {
            Curve::P224 => EcPrivateKey::P224(p224::SecretKey::from_slice(sec1_key.private_key)?),
            Curve::P256 => EcPrivateKey::P256(p256::SecretKey::from_slice(sec1_key.private_key)?),
            Curve::P384 => EcPrivateKey::P384(p384::SecretKey::from_slice(sec1_key.private_key)?),
            Curve::P521 => EcPrivateKey::P521(p521::SecretKey::from_slice(sec1_key.private_key)?),
        };
        Ok(key)
    }

    /// Serializes as SEC1 DER with the named curve and public key included.
    pub fn to_sec1_der(&self) -> Result<Vec<u8>, FormatError> {
        let (scalar, point) = match self {
            EcPrivateKey::P224(key) => (
                Zeroizing::new(key.to_bytes().to_vec()),
                key.public_key().to_encoded_point(false).as_bytes().to_vec(),
            ),
            EcPrivateKey::P256(key) => (
                Zeroizing::new(key.to_bytes().to_vec()),
                key.public_key().to_encoded_point(false).as_bytes().to_vec(),
            ),
            EcPrivateKey::P384(key) => (
                Zeroizing::new(key.to_bytes().to_vec()),
                key.public_key().to_encoded_point(false).as_bytes().to_vec(),
            ),
            EcPrivateKey::P521(key) => (
                Zeroizing::new(key.to_bytes().to_vec()),
                key.public_key().to_encoded_point(false).as_bytes().to_vec(),
            ),
        };
        let sec1_key = sec1::EcPrivateKey {
            private_key: &scalar,
            parameters: Some(sec1::EcParameters::NamedCurve(self.curve().oid())),
            public_key: Some(&point),
        };
        Ok(sec1_key.to_der()?)
    }

    pub(crate) fn from_pkcs8_der(bytes: &[u8], curve: Curve) -> Result<Self, FormatError> {
        let key = match curve {
            Curve::P224 => EcPrivateKey::P224(p224::SecretKey::from_pkcs8_der(bytes)?),
            Curve::P256 => EcPrivateKey::P256(p256::SecretKey::from_pkcs8_der(bytes)?),
            Curve::P384 => EcPrivateKey::P384(p384::SecretKey::from_pkcs8_der(bytes)?),
            Curve::P521 => EcPrivateKey::P521(p521::SecretKey::from_pkcs8_der(bytes)?),
        };
        Ok(key)
    }
}

/// An EC public key on one of the supported curves.
#[derive(Debug, Clone, PartialEq)]
pub enum EcPublicKey {
    P224(p224::PublicKey),
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

impl EcPublicKey {
    pub fn curve(&self) -> Curve {
        match self {
            EcPublicKey::P224(_) => Curve::P224,
            EcPublicKey::P256(_) => Curve::P256,
            EcPublicKey::P384(_) => Curve::P384,
            EcPublicKey::P521(_) => Curve::P521,
        }
    }

    fn from_public_key_der(bytes: &[u8], curve: Curve) -> Result<Self, FormatError> {
        let key = match curve {
            Curve::P224 => EcPublicKey::P224(p224::PublicKey::from_public_key_der(bytes)?),
            Curve::P256 => EcPublicKey::P256(p256::PublicKey::from_public_key_der(bytes)?),
            Curve::P384 => EcPublicKey::P384(p384::PublicKey::from_public_key_der(bytes)?),
            Curve::P521 => EcPublicKey::P521(p521::PublicKey::from_public_key_der(bytes)?),
        };
        Ok(key)
    }

    fn to_public_key_der(&self) -> Result<Vec<u8>, FormatError> {
        let document = match self {
            EcPublicKey::P224(key) => key.to_public_key_der()?,
            EcPublicKey::P256(key) => key.to_public_key_der()?,
            EcPublicKey::P384(key) => key.to_public_key_der()?,
            EcPublicKey::P521(key) => key.to_public_key_der()?,
        };
        Ok(document.as_bytes().to_vec())
    }
}

/// A public key, as carried by a `PUBLIC KEY` block.
#[derive(Debug, Clone, PartialEq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Ec(EcPublicKey),
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Rsa(_) => KeyAlgorithm::Rsa,
            PublicKey::Ec(key) => KeyAlgorithm::Ec(key.curve()),
        }
    }

    /// Key size in bits: the modulus length for RSA, the field size for EC.
    pub fn key_size(&self) -> usize {
        match self {
            PublicKey::Rsa(key) => key.size() * 8,
            PublicKey::Ec(key) => key.curve().bits(),
        }
    }

    /// Parses an X.509 SubjectPublicKeyInfo holding an RSA or EC key.
    pub fn from_spki_der(bytes: &[u8]) -> Result<Self, FormatError> {
        let spki = SubjectPublicKeyInfoRef::from_der(bytes)?;
        let (algorithm, parameters) = spki.algorithm.oids()?;
        if algorithm == OID_RSA_ENCRYPTION {
            let key = pkcs1::RsaPublicKey::from_der(spki.subject_public_key.raw_bytes())?;
            let n = BigUint::from_bytes_be(key.modulus.as_bytes());
            let e = BigUint::from_bytes_be(key.public_exponent.as_bytes());
            return Ok(PublicKey::Rsa(RsaPublicKey::new_with_max_size(
                n,
                e,
                RSA_MAX_BITS,
            )?));
        }
        if algorithm != OID_EC_PUBLIC_KEY {
            return Err(FormatError::UnsupportedAlgorithm(algorithm));
        }
        let oid = parameters.ok_or(FormatError::MissingCurve)?;
        let curve = Curve::from_oid(oid).ok_or(FormatError::UnsupportedCurve(oid))?;
        Ok(PublicKey::Ec(EcPublicKey::from_public_key_der(bytes, curve)?))
    }

    /// Serializes as X.509 SubjectPublicKeyInfo DER.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, FormatError> {
        match self {
            PublicKey::Rsa(key) => Ok(key.to_public_key_der()?.as_bytes().to_vec()),
            PublicKey::Ec(key) => key.to_public_key_der(),
        }
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        PublicKey::Rsa(key)
    }
}

impl From<EcPublicKey> for PublicKey {
    fn from(key: EcPublicKey) -> Self {
        PublicKey::Ec(key)
    }
}

/// A private key produced by the PKCS#1/PKCS#8 fallback decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum PrivateKey {
    Rsa(RsaPrivateKey),
    Ec(EcPrivateKey),
}

impl PrivateKey {
    /// The store key a decoded private key belongs under.
    pub fn kind(&self) -> BlockKind {
        match self {
            PrivateKey::Rsa(_) => BlockKind::RsaPrivateKey,
            PrivateKey::Ec(_) => BlockKind::EcPrivateKey,
        }
    }
}

impl From<PrivateKey> for Primitive {
    fn from(key: PrivateKey) -> Self {
        match key {
            PrivateKey::Rsa(key) => Primitive::RsaPrivateKey(key),
            PrivateKey::Ec(key) => Primitive::EcPrivateKey(key),
        }
    }
}

/// A decoded block.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Undecoded block contents, kept when a generically labeled block
    /// could not be parsed
    Raw(Vec<u8>),
    RsaPrivateKey(RsaPrivateKey),
    PublicKey(PublicKey),
    EcPrivateKey(EcPrivateKey),
    Certificate(Box<Certificate>),
}

impl Primitive {
    /// A short human-readable name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Raw(_) => "raw bytes",
            Primitive::RsaPrivateKey(_) => "RSA private key",
            Primitive::PublicKey(_) => "public key",
            Primitive::EcPrivateKey(_) => "EC private key",
            Primitive::Certificate(_) => "certificate",
        }
    }

    /// Returns the key algorithm, or `None` for raw bytes.
    ///
    /// For a certificate this is the algorithm of its subject public key.
    pub fn algorithm(&self) -> Option<KeyAlgorithm> {
        match self {
            Primitive::Raw(_) => None,
            Primitive::RsaPrivateKey(_) => Some(KeyAlgorithm::Rsa),
            Primitive::PublicKey(key) => Some(key.algorithm()),
            Primitive::EcPrivateKey(key) => Some(KeyAlgorithm::Ec(key.curve())),
            Primitive::Certificate(cert) => subject_public_key(cert).ok().map(|k| k.algorithm()),
        }
    }

    /// Returns the key size in bits, or the length in bits of raw bytes.
    pub fn key_size(&self) -> Option<usize> {
        match self {
            Primitive::Raw(bytes) => Some(bytes.len() * 8),
            Primitive::RsaPrivateKey(key) => Some(key.size() * 8),
            Primitive::PublicKey(key) => Some(key.key_size()),
            Primitive::EcPrivateKey(key) => Some(key.curve().bits()),
            Primitive::Certificate(cert) => subject_public_key(cert).ok().map(|k| k.key_size()),
        }
    }

    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Primitive::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_rsa_private_key(&self) -> Option<&RsaPrivateKey> {
        match self {
            Primitive::RsaPrivateKey(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_public_key(&self) -> Option<&PublicKey> {
        match self {
            Primitive::PublicKey(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_ec_private_key(&self) -> Option<&EcPrivateKey> {
        match self {
            Primitive::EcPrivateKey(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_certificate(&self) -> Option<&Certificate> {
        match self {
            Primitive::Certificate(cert) => Some(cert),
            _ => None,
        }
    }
}

/// Decodes the subject public key of a certificate.
pub fn subject_public_key(cert: &Certificate) -> Result<PublicKey, FormatError> {
    let spki = cert.tbs_certificate.subject_public_key_info.to_der()?;
    PublicKey::from_spki_der(&spki)
}
