//! Filesystem collaborators: whole-file reads, atomic whole-file writes,
//! metadata and the admission gate for compression.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::Result;

pub trait ByteSource {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>>;
}

pub trait ByteSink {
    /// Replace the contents of `path` with `bytes`. Either the whole buffer
    /// lands or the destination is left as it was.
    fn write_all(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

pub trait PathMetadata {
    fn file_size(&self, path: &Path) -> Result<u64>;

    /// Best effort; failures are logged and otherwise ignored.
    fn copy_permissions(&self, src: &Path, dst: &Path);
}

pub trait PathClassifier {
    fn accepts_as_compressible(&self, path: &Path) -> bool;
}

/// `std::fs` backed store
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl ByteSource for FileStore {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }
}

impl ByteSink for FileStore {
    fn write_all(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl PathMetadata for FileStore {
    fn file_size(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn copy_permissions(&self, src: &Path, dst: &Path) {
        let result = fs::metadata(src).and_then(|meta| fs::set_permissions(dst, meta.permissions()));
        if let Err(e) = result {
            warn!(src = %src.display(), dst = %dst.display(), error = %e, "could not copy permissions");
        }
    }
}

/// Admits paths by file extension, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct ExtensionClassifier {
    extensions: Vec<String>,
}

impl ExtensionClassifier {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ExtensionClassifier {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        ExtensionClassifier::new(["txt"])
    }
}

impl PathClassifier for ExtensionClassifier {
    fn accepts_as_compressible(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }
}
