//! Resource access and at-rest encoding.
//!
//! The actual encryption scheme is supplied from outside through
//! [`StateCodec`]. [`PlainCodec`] passes bytes through untouched and is
//! what the CLI uses out of the box.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use musiterm_core::{ResourceProvider, StateCodec};

use crate::error::StoreError;

/// Identity codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

impl StateCodec for PlainCodec {
    fn encode(&self, plain: &[u8]) -> Result<Vec<u8>> {
        Ok(plain.to_vec())
    }

    fn decode(&self, blob: &[u8]) -> Result<Vec<u8>> {
        Ok(blob.to_vec())
    }
}

/// Reads `<root>/<name>` and decodes it.
pub struct DirectoryProvider {
    root: PathBuf,
    codec: Arc<dyn StateCodec>,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>, codec: Arc<dyn StateCodec>) -> Self {
        Self {
            root: root.into(),
            codec,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceProvider for DirectoryProvider {
    fn decode(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        let blob = std::fs::read(&path)
            .with_context(|| format!("failed to read resource: {}", path.display()))?;
        self.codec
            .decode(&blob)
            .with_context(|| format!("failed to decode resource: {}", path.display()))
    }
}

/// A single persisted state file, encoded on write and decoded on read.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so readers never observe a partial file.
pub struct StateFile {
    path: PathBuf,
    codec: Arc<dyn StateCodec>,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>, codec: Arc<dyn StateCodec>) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decoded contents, or `None` if the file does not exist.
    pub fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let blob = match std::fs::read(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        self.codec
            .decode(&blob)
            .map(Some)
            .map_err(|e| StoreError::Codec {
                path: self.path.clone(),
                message: format!("{e:#}"),
            })
    }

    /// Encode `plain` and atomically replace the file with it.
    pub fn write(&self, plain: &[u8]) -> Result<(), StoreError> {
        let blob = self.codec.encode(plain).map_err(|e| StoreError::Codec {
            path: self.path.clone(),
            message: format!("{e:#}"),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|source| self.io_error(source))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|source| self.io_error(source))?;
        tmp.write_all(&blob).map_err(|source| self.io_error(source))?;
        tmp.as_file()
            .sync_all()
            .map_err(|source| self.io_error(source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = blob.len(), "state file written");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
