//! Filesystem blob storage for uploaded resources.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use lectern_core::Result;
use lectern_core::error::StoreError;
use lectern_core::traits::BlobStore;

/// Blob storage rooted at an uploads directory.
///
/// Stored names are the sanitized suggested stem, a unix-seconds suffix
/// for disambiguation, and the (sanitized, lowercased) original
/// extension. Only the final path component of the suggestion is used,
/// so a caller cannot traverse outside the root.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Create a blob store rooted at the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The uploads root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sanitize(part: &str) -> String {
        part.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn stored_name(suggested_name: &str) -> String {
        let suggested = Path::new(suggested_name);

        let stem = suggested
            .file_stem()
            .and_then(|s| s.to_str())
            .map(Self::sanitize)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "upload".to_string());

        let extension = suggested
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| Self::sanitize(s).to_ascii_lowercase())
            .filter(|s| !s.is_empty());

        let stamp = Utc::now().timestamp();
        match extension {
            Some(ext) => format!("{}_{}.{}", stem, stamp, ext),
            None => format!("{}_{}", stem, stamp),
        }
    }
}

impl BlobStore for FileBlobStore {
    fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Access {
            path: self.root.clone(),
            source,
        })?;

        let path = self.root.join(Self::stored_name(suggested_name));
        fs::write(&path, bytes).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), size = bytes.len(), "Stored blob");
        Ok(path)
    }

    fn delete(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted blob");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                path: path.to_path_buf(),
                source,
            }
            .into()),
        }
    }
}
