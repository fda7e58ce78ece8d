use std::io;
use std::path::PathBuf;

use pemutil::{Source, Store};

use crate::error::Result;

/// Load every file into one store, later files overwriting earlier entries
///
/// If `files` is empty, reads from stdin.
pub(crate) fn load_store(files: &[PathBuf]) -> Result<Store> {
    let mut store = Store::new();
    if files.is_empty() {
        store.load([Source::reader(io::stdin().lock())])?;
    } else {
        store.load(files.iter().map(|path| Source::from(path.as_path())))?;
    }
    Ok(store)
}
