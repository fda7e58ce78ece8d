//! The key store: a map from block kind to decoded primitive.

use std::collections::BTreeMap;
use std::path::Path;

use pem::Pem;
use rsa::RsaPrivateKey;
use tracing::debug;
use x509_cert::Certificate;

use crate::error::{Error, Result};
use crate::kind::BlockKind;
use crate::primitive::{EcPrivateKey, Primitive, PublicKey};
use crate::source::{self, Source};
use crate::{decode, encode};

/// Decoded primitives keyed by [`BlockKind`].
///
/// Each kind holds at most one primitive. A later write under the same kind
/// replaces the earlier one, so the last block of a kind in the input wins.
/// Iteration follows the declaration order of [`BlockKind`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    entries: BTreeMap<BlockKind, Primitive>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: BlockKind) -> Option<&Primitive> {
        self.entries.get(&kind)
    }

    pub fn contains(&self, kind: BlockKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, &Primitive)> {
        self.entries.iter().map(|(kind, primitive)| (*kind, primitive))
    }

    pub(crate) fn insert(&mut self, kind: BlockKind, primitive: Primitive) {
        if self.entries.insert(kind, primitive).is_some() {
            debug!(%kind, "replaced existing entry");
        }
    }

    /// Moves every entry of `other` into this store, overwriting entries of
    /// the same kind.
    pub fn extend(&mut self, other: Store) {
        for (kind, primitive) in other.entries {
            self.insert(kind, primitive);
        }
    }

    /// Raw bytes kept from a `PRIVATE KEY` block that did not decode.
    pub fn private_key_bytes(&self) -> Option<&[u8]> {
        self.get(BlockKind::GenericPrivateKey).and_then(Primitive::as_raw)
    }

    pub fn rsa_private_key(&self) -> Option<&RsaPrivateKey> {
        self.get(BlockKind::RsaPrivateKey)
            .and_then(Primitive::as_rsa_private_key)
    }

    pub fn ec_private_key(&self) -> Option<&EcPrivateKey> {
        self.get(BlockKind::EcPrivateKey)
            .and_then(Primitive::as_ec_private_key)
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        self.get(BlockKind::PublicKey).and_then(Primitive::as_public_key)
    }

    pub fn certificate(&self) -> Option<&Certificate> {
        self.get(BlockKind::Certificate)
            .and_then(Primitive::as_certificate)
    }

    /// Decodes every PEM block in `bytes` into this store.
    ///
    /// See [`decode::decode`].
    pub fn decode(&mut self, bytes: &[u8]) -> Result<()> {
        decode::decode(self, bytes)
    }

    /// Loads `sources` in order into this store.
    ///
    /// See [`source::load`].
    pub fn load<'a>(&mut self, sources: impl IntoIterator<Item = Source<'a>>) -> Result<()> {
        source::load(self, sources)
    }

    /// Builds a store from the PEM file at `path`.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Store::new();
        store.load([Source::from(path.as_ref())])?;
        Ok(store)
    }

    /// Builds a store from an in-memory PEM buffer.
    pub fn load_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let mut store = Store::new();
        store.decode(bytes.as_ref())?;
        Ok(store)
    }

    /// Derives the public key of each private key and stores it under
    /// [`BlockKind::PublicKey`].
    ///
    /// RSA is derived first and EC second, so an EC key wins when both are
    /// present. Other entries are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] if an entry under `RsaPrivateKey` or
    /// `EcPrivateKey` does not hold a private key of that type.
    pub fn add_public_keys(&mut self) -> Result<()> {
        let mut derived = Vec::new();
        if let Some(primitive) = self.get(BlockKind::RsaPrivateKey) {
            let key = primitive.as_rsa_private_key().ok_or(Error::KindMismatch {
                kind: BlockKind::RsaPrivateKey,
                found: primitive.name(),
            })?;
            derived.push(PublicKey::Rsa(key.to_public_key()));
        }
        if let Some(primitive) = self.get(BlockKind::EcPrivateKey) {
            let key = primitive.as_ec_private_key().ok_or(Error::KindMismatch {
                kind: BlockKind::EcPrivateKey,
                found: primitive.name(),
            })?;
            derived.push(PublicKey::Ec(key.public_key()));
        }
        for key in derived {
            debug!(algorithm = %key.algorithm(), "derived public key");
            self.insert(BlockKind::PublicKey, Primitive::PublicKey(key));
        }
        Ok(())
    }

    /// Encodes each entry, yielding one result per entry so that callers
    /// can skip entries the encoder does not support.
    pub fn encode_entries(&self) -> impl Iterator<Item = (BlockKind, Result<Pem>)> + '_ {
        self.iter()
            .map(|(kind, primitive)| (kind, encode::encode(primitive)))
    }

    /// Frames every entry as PEM and concatenates the blocks.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be encoded, such as a
    /// certificate.
    pub fn to_pem(&self) -> Result<String> {
        let pems = self
            .encode_entries()
            .map(|(_, pem)| pem)
            .collect::<Result<Vec<_>>>()?;
        Ok(pem::encode_many(&pems))
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = (BlockKind, &'a Primitive);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
