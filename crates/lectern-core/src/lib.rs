//! lectern-core - Domain types, error taxonomy, and capability traits
//! for the lectern flat-file catalog.

pub mod client;
pub mod error;
pub mod guard;
pub mod outcome;
pub mod records;
pub mod traits;
pub mod types;

pub use client::ClientInfo;
pub use error::Error;
pub use outcome::{Outcome, Status};
pub use records::{ResourceRecord, UserRecord};
pub use traits::{
    BlobStore, Catalog, CredentialHasher, NewResource, NewUser, RegisteredUser, Scope,
};
pub use types::{EmailAddress, Principal, ResourceId, Role};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
