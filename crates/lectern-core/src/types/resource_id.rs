//! Resource identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};

/// A validated resource identifier.
///
/// Format: `res_<unix-seconds>_<hex>` — a monotonic-enough timestamp
/// concatenated with a random component, making collisions negligible.
/// Generation lives with the store implementation; this type only
/// enforces the shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a resource id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not have the `res_` prefix
    /// or contains whitespace.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();

        let rest = s.strip_prefix("res_").ok_or(ValidationError::InvalidResourceId)?;
        if rest.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidResourceId.into());
        }

        Ok(Self(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ResourceId::new(s).map_err(serde::de::Error::custom)
    }
}
