use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::error::Result;
use crate::utils::load_store;

#[derive(Args)]
pub(crate) struct Config {
    /// PEM files to load. If not specified, reads from stdin
    pub(crate) files: Vec<PathBuf>,

    /// Derive and emit the public key of each private key
    #[arg(long)]
    pub(crate) public: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let mut store = load_store(&config.files)?;
    if config.public {
        store.add_public_keys()?;
    }

    let mut output = String::new();
    for (kind, pem) in store.encode_entries() {
        match pem {
            Ok(pem) => output.push_str(&pem.to_string()),
            Err(e @ pemutil::Error::UnsupportedPrimitive(_)) => {
                warn!(%kind, "skipping entry: {}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    print!("{}", output);
    Ok(())
}
