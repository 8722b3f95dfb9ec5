//! Blob storage capability.

use std::path::{Path, PathBuf};

use crate::Result;

/// Storage for uploaded binary artifacts, referenced by path from
/// resource records.
///
/// Implementations must normalize `suggested_name` to a safe character
/// set and disambiguate stored names so callers can neither collide nor
/// traverse outside the store.
pub trait BlobStore: Send + Sync {
    /// Store a blob, returning the path future reads should use.
    fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<PathBuf>;

    /// Delete a stored blob. Deleting a blob that no longer exists is
    /// not an error.
    fn delete(&self, path: &Path) -> Result<()>;
}
