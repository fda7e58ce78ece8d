use clap::{Args, ValueEnum};
use pemutil::{Curve, generate};

use crate::error::Result;

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum KeyType {
    /// RSA key pair
    Rsa,
    /// EC key pair on a NIST curve
    Ecc,
    /// Random symmetric key
    Sym,
}

#[derive(Args)]
pub(crate) struct Config {
    /// Type of key to generate
    #[arg(short = 't', long = "type", value_enum)]
    pub(crate) key_type: KeyType,

    /// Key length: modulus size in bits for rsa, byte count for sym
    #[arg(short, long)]
    pub(crate) length: Option<usize>,

    /// Curve for ecc keys (P224, P256, P384, P521)
    #[arg(short, long)]
    pub(crate) curve: Option<String>,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let store = match config.key_type {
        KeyType::Rsa => {
            let bits = config.length.ok_or("--length is required for rsa keys")?;
            generate::rsa(bits)?
        }
        KeyType::Ecc => {
            let name = config.curve.ok_or("--curve is required for ecc keys")?;
            let curve: Curve = name.parse()?;
            generate::ec(curve)?
        }
        KeyType::Sym => {
            let len = config.length.ok_or("--length is required for sym keys")?;
            generate::symmetric(len)?
        }
    };
    print!("{}", store.to_pem()?);
    Ok(())
}
