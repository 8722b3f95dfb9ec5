//! Uniform operation result shape for transport boundaries.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Whether an operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The `{status, message, data?}` envelope every catalog operation is
/// reduced to at the transport boundary. Errors never escape past this
/// shape; their display string becomes the message.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Outcome<T> {
    /// A successful outcome with no payload.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: None,
        }
    }

    /// A failed outcome.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            data: None,
        }
    }

    /// Reduce a catalog result to an outcome, attaching the payload on
    /// success.
    pub fn from_result(result: Result<T>, success_message: impl Into<String>) -> Self {
        match result {
            Ok(data) => Self {
                status: Status::Success,
                message: success_message.into(),
                data: Some(data),
            },
            Err(err) => Self::error(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn success_envelope() {
        let outcome = Outcome::from_result(Ok(42), "Done.");
        assert!(outcome.is_success());
        assert_eq!(outcome.data, Some(42));
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"status":"success","message":"Done.","data":42}"#);
    }

    #[test]
    fn error_envelope_carries_the_message() {
        let outcome: Outcome<()> = Outcome::from_result(Err(Error::Forbidden), "unused");
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.message,
            "You are not authorized to modify this resource."
        );
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.starts_with(r#"{"status":"error""#));
        assert!(!json.contains("\"data\""));
    }
}
