//! Input sources for [`load`].

use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::store::Store;

/// One input to [`load`].
pub enum Source<'a> {
    /// A file, read whole
    Path(PathBuf),
    /// An in-memory buffer
    Bytes(Vec<u8>),
    /// A reader, drained to EOF
    Reader(Box<dyn Read + 'a>),
}

impl<'a> Source<'a> {
    pub fn reader(reader: impl Read + 'a) -> Self {
        Source::Reader(Box::new(reader))
    }

    // position is only used to tag errors
    fn read_all(self, position: usize) -> Result<Vec<u8>> {
        let io = |source| Error::Io { position, source };
        match self {
            Source::Bytes(bytes) => Ok(bytes),
            Source::Path(path) => {
                let metadata = std::fs::metadata(&path).map_err(io)?;
                if !metadata.is_file() {
                    return Err(Error::UnsupportedSource { position });
                }
                let mut buf = Vec::new();
                File::open(&path)
                    .and_then(|mut file| file.read_to_end(&mut buf))
                    .map_err(io)?;
                Ok(buf)
            }
            Source::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).map_err(io)?;
                Ok(buf)
            }
        }
    }
}

impl Debug for Source<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Source::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<PathBuf> for Source<'_> {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source<'_> {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for Source<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<&[u8]> for Source<'_> {
    fn from(bytes: &[u8]) -> Self {
        Source::Bytes(bytes.to_vec())
    }
}

/// Reads each source in order and decodes it into `store`.
///
/// Stops at the first error and returns it. Sources before the failing one
/// stay decoded in `store`, as do blocks of the failing source that were
/// dispatched before its error. Positions in errors count from zero.
///
/// # Errors
///
/// - [`Error::UnsupportedSource`] for a path that is not a regular file.
/// - [`Error::Io`] if reading a source fails.
/// - Any error of [`decode`](crate::decode::decode).
pub fn load<'a>(store: &mut Store, sources: impl IntoIterator<Item = Source<'a>>) -> Result<()> {
    for (position, source) in sources.into_iter().enumerate() {
        debug!(position, ?source, "loading source");
        let bytes = source.read_all(position)?;
        store.decode(&bytes)?;
    }
    Ok(())
}
