//! lectern-file - Delimited flat-file implementation of the lectern
//! catalog.
//!
//! One backing text file per collection: pretty-printed JSON records
//! separated by `---` delimiter lines. Appends and rewrites serialize on
//! an exclusive advisory file lock; rewrites become visible atomically
//! via a temp-file rename.

pub mod blob;
pub mod catalog;
pub mod codec;
pub mod hasher;
pub mod store;

pub use blob::FileBlobStore;
pub use catalog::FileCatalog;
pub use hasher::BcryptHasher;
pub use store::RecordStore;
