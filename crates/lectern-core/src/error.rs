//! Error types for the lectern catalog and record store.
//!
//! This module provides a unified error type with explicit variants for
//! validation, authorization, and storage failures. Every variant renders
//! to a human-readable message; the catalog boundary converts errors into
//! an [`Outcome`](crate::Outcome) instead of letting them escape.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input validation failures, each with a 1:1 user-facing message.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Uniform authentication failure. Deliberately does not distinguish
    /// an unknown email from a wrong password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// No record matched the given identifier.
    #[error("{what} not found.")]
    NotFound {
        /// What was looked for, e.g. "Resource".
        what: &'static str,
    },

    /// The acting principal does not own the record it tried to mutate.
    #[error("You are not authorized to modify this resource.")]
    Forbidden,

    /// A uniqueness constraint was violated.
    #[error("{message}")]
    Conflict { message: String },

    /// Credential hashing backend failure.
    #[error("credential hashing failed: {message}")]
    Hashing { message: String },

    /// Backing file errors (unreadable medium, failed write, held lock).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input validation errors.
///
/// The display strings double as the user-facing messages, so they are
/// written as full sentences.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required registration field was empty.
    #[error("Please fill in all required fields.")]
    MissingFields,

    /// Email or password missing at login.
    #[error("Email and password are required.")]
    MissingCredentials,

    /// The email does not look like an address.
    #[error("Invalid email format provided.")]
    InvalidEmail,

    /// The password is shorter than the minimum.
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },

    /// Password and confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// The role is not one of the accepted set.
    #[error("Invalid role selected.")]
    InvalidRole,

    /// A resource identifier with the wrong shape.
    #[error("Invalid resource identifier.")]
    InvalidResourceId,

    /// Upload without a title or description.
    #[error("Title and description are required.")]
    MissingResourceDetails,

    /// Edit that would blank the title or description.
    #[error("Title and description cannot be empty.")]
    EmptyResourceDetails,
}

/// Storage-level errors from the flat-file record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be opened or read. Treated as a
    /// configuration fault, not a user error.
    #[error("cannot access {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write was attempted and failed.
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The exclusive lock was not acquired within the bounded wait.
    /// Retryable.
    #[error("{path} is busy, try again shortly")]
    Busy { path: PathBuf },

    /// A record could not be serialized.
    #[error("record encoding failed: {message}")]
    Encode { message: String },

    /// A segment could not be parsed as a record.
    #[error("record decoding failed: {message}")]
    Decode { message: String },
}

impl Error {
    /// True for conditions a caller may sensibly retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Store(StoreError::Busy { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Please fill in all required fields."
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters long."
        );
    }

    #[test]
    fn invalid_credentials_is_uniform() {
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "Invalid email or password."
        );
    }

    #[test]
    fn not_found_names_the_subject() {
        let err = Error::NotFound { what: "Resource" };
        assert_eq!(err.to_string(), "Resource not found.");
    }

    #[test]
    fn busy_is_retryable() {
        let err = Error::Store(StoreError::Busy {
            path: PathBuf::from("resource.txt"),
        });
        assert!(err.is_retryable());
        assert!(!Error::Forbidden.is_retryable());
    }
}
