//! Validated domain types.

mod email;
mod principal;
mod resource_id;
mod role;

pub use email::EmailAddress;
pub use principal::Principal;
pub use resource_id::ResourceId;
pub use role::Role;
