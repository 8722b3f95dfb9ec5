//! Acting principal type.

use serde::{Deserialize, Serialize};

use super::{EmailAddress, Role};

/// The identity of an authenticated user, as returned by
/// [`Catalog::authenticate`](crate::Catalog::authenticate) and required
/// by every mutating catalog operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Display name (the registered first name).
    pub name: String,
    /// The authenticated email, exactly as stored.
    pub email: EmailAddress,
    /// The registered role.
    pub role: Role,
}
