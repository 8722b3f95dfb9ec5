//! Capability traits and the catalog surface.

mod blob;
mod catalog;
mod hasher;

pub use blob::BlobStore;
pub use catalog::{Catalog, NewResource, NewUser, RegisteredUser, Scope};
pub use hasher::CredentialHasher;
