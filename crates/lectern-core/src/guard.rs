//! Ownership authorization.

use crate::Result;
use crate::error::Error;
use crate::types::Principal;

/// Check that the acting principal owns a record.
///
/// The comparison is byte-for-byte on the email: ownership belongs to
/// the exact identity captured in the record's uploader block. A
/// mismatch is [`Error::Forbidden`], which the caller must keep distinct
/// from "not found". Invoked inside a rewrite transform before any
/// mutation is permitted, so an unauthorized request aborts the whole
/// rewrite.
pub fn authorize_owner(owner_email: &str, principal: &Principal) -> Result<()> {
    if principal.email.as_str() == owner_email {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmailAddress, Role};

    fn principal(email: &str) -> Principal {
        Principal {
            name: "Grace".to_string(),
            email: EmailAddress::new(email).unwrap(),
            role: Role::Lecturer,
        }
    }

    #[test]
    fn owner_is_allowed() {
        assert!(authorize_owner("grace@x.com", &principal("grace@x.com")).is_ok());
    }

    #[test]
    fn other_user_is_denied() {
        let err = authorize_owner("grace@x.com", &principal("mallory@x.com")).unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        // Ownership is granted to the exact stored identity.
        let err = authorize_owner("grace@x.com", &principal("Grace@x.com")).unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }
}
