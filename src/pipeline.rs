//! File-level operations built from the codec, the cipher and the store.

use std::path::Path;

use tracing::info;

use crate::cipher::{StreamCipher, XorKeystream};
use crate::codec::{self, AutoSafe};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::store::{ByteSink, ByteSource, ExtensionClassifier, FileStore, PathClassifier, PathMetadata};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressReport {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressReport {
    /// Compressed size over original size; zero for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.compressed_size as f64 / self.original_size as f64
    }

    /// Space saved, in percent
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.ratio()) * 100.0
    }
}

pub struct FilePipeline<S = FileStore, C = ExtensionClassifier> {
    store: S,
    classifier: C,
    autosafe: AutoSafe,
}

impl FilePipeline {
    pub fn from_settings(settings: &Settings) -> Self {
        FilePipeline::new(FileStore, settings.classifier(), settings.autosafe)
    }
}

impl<S, C> FilePipeline<S, C>
where
    S: ByteSource + ByteSink + PathMetadata,
    C: PathClassifier,
{
    pub fn new(store: S, classifier: C, autosafe: AutoSafe) -> Self {
        FilePipeline {
            store,
            classifier,
            autosafe,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn compress_file(&self, src: &Path, dst: &Path) -> Result<CompressReport> {
        if !self.classifier.accepts_as_compressible(src) {
            return Err(Error::NotAdmitted(src.to_path_buf()));
        }
        let data = self.store.read_all(src)?;
        let container = codec::compress(&data, self.autosafe)?;
        self.store.write_all(dst, &container)?;
        self.store.copy_permissions(src, dst);

        let report = CompressReport {
            original_size: data.len() as u64,
            compressed_size: container.len() as u64,
        };
        info!(src = %src.display(), dst = %dst.display(), ratio = report.ratio(), "compressed file");
        Ok(report)
    }

    pub fn decompress_file(&self, src: &Path, dst: &Path) -> Result<u64> {
        let container = self.store.read_all(src)?;
        let data = codec::decompress(&container)?;
        self.store.write_all(dst, &data)?;
        self.store.copy_permissions(src, dst);
        info!(src = %src.display(), dst = %dst.display(), bytes = data.len(), "decompressed file");
        Ok(data.len() as u64)
    }

    pub fn encrypt_file(&self, src: &Path, dst: &Path, password: &str) -> Result<()> {
        self.transform_file(src, dst, |data| XorKeystream::new(password).encrypt(data))?;
        info!(src = %src.display(), dst = %dst.display(), "encrypted file");
        Ok(())
    }

    pub fn decrypt_file(&self, src: &Path, dst: &Path, password: &str) -> Result<()> {
        self.transform_file(src, dst, |data| XorKeystream::new(password).decrypt(data))?;
        info!(src = %src.display(), dst = %dst.display(), "decrypted file");
        Ok(())
    }

    fn transform_file(&self, src: &Path, dst: &Path, f: impl FnOnce(&mut [u8])) -> Result<()> {
        let mut data = self.store.read_all(src)?;
        f(&mut data);
        self.store.write_all(dst, &data)?;
        self.store.copy_permissions(src, dst);
        Ok(())
    }

    pub fn files_identical(&self, a: &Path, b: &Path) -> Result<bool> {
        Ok(self.store.read_all(a)? == self.store.read_all(b)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_ratio_and_reduction() {
        let report = CompressReport {
            original_size: 2000,
            compressed_size: 1500,
        };
        assert_eq!(report.ratio(), 0.75);
        assert_eq!(report.reduction_percent(), 25.0);

        let empty = CompressReport {
            original_size: 0,
            compressed_size: 1036,
        };
        assert_eq!(empty.ratio(), 0.0);
    }
}
