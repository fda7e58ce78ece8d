//! # pemutil
//!
//! Load keys and certificates from PEM text into a typed [`Store`], and write
//! them back.
//!
//! ## Overview
//!
//! ```text
//! Source → bytes → PEM block → BlockKind → Primitive → Store
//! ```
//!
//! Each block is classified by its label and decoded with the parser that
//! label calls for. Blocks with a generic label (`PRIVATE KEY`,
//! `PUBLIC KEY`) that do not parse are kept as raw bytes. Blocks whose label
//! names a format (`RSA PRIVATE KEY`, `EC PRIVATE KEY`, `CERTIFICATE`) must
//! parse or the load fails.
//!
//! Private keys of unknown format go through a fallback decoder that tries
//! PKCS#1 and then PKCS#8.
//!
//! ## Example
//!
//! ```no_run
//! use pemutil::Store;
//!
//! let mut store = Store::load_file("key.pem").unwrap();
//! store.add_public_keys().unwrap();
//! print!("{}", store.to_pem().unwrap());
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod generate;
pub mod kind;
pub mod primitive;
pub mod source;
pub mod store;

pub use decode::{decode_private_key, dispatch};
pub use encode::encode;
pub use error::{Error, FormatError, Result};
pub use kind::BlockKind;
pub use primitive::{
    Curve, EcPrivateKey, EcPublicKey, KeyAlgorithm, Primitive, PrivateKey, PublicKey,
    subject_public_key,
};
pub use source::{Source, load};
pub use store::Store;
