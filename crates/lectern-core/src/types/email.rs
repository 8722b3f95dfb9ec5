//! Email address type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};

/// A validated email address.
///
/// Construction trims surrounding whitespace and checks the basic shape
/// (a non-empty local part, one `@`, a domain containing a dot). The
/// original case is preserved; use [`matches_ignore_case`] where the
/// store treats addresses as case-insensitive.
///
/// [`matches_ignore_case`]: EmailAddress::matches_ignore_case
///
/// # Example
///
/// ```
/// use lectern_core::EmailAddress;
///
/// let email = EmailAddress::new(" Ada@X.com ").unwrap();
/// assert_eq!(email.as_str(), "Ada@X.com");
/// assert!(email.matches_ignore_case("ada@x.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if the string does not
    /// look like an address.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();

        let (local, domain) = s.split_once('@').ok_or(ValidationError::InvalidEmail)?;

        if local.is_empty()
            || domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || s.chars().any(char::is_whitespace)
            || domain.contains('@')
        {
            return Err(ValidationError::InvalidEmail.into());
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another address string.
    ///
    /// The other side is trimmed first, mirroring how addresses are
    /// compared when scanning the user directory.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EmailAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::new(&s).map_err(serde::de::Error::custom)
    }
}
