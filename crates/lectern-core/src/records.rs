//! Stored record shapes.
//!
//! These structs serialize to the exact JSON key spelling used in the
//! backing files (`user.txt`, `resource.txt`), so existing data remains
//! readable and written files stay interoperable.

use serde::{Deserialize, Serialize};

use crate::types::{EmailAddress, ResourceId, Role};

/// One entry in the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub personal_details: PersonalDetails,
    #[serde(default)]
    pub file_paths: UserFilePaths,
    pub metadata: ClientMetadata,
}

/// Identity block of a user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    /// Weak pseudo-identifier derived from the name at registration.
    pub matric_number: String,
    /// Case-insensitively unique across the store (soft invariant).
    pub email: EmailAddress,
    pub role: Role,
    #[serde(default)]
    pub phone_number: String,
    /// Opaque credential hash; never the plaintext.
    pub password_hash: String,
}

/// Paths of identity documents uploaded for the user. Currently always
/// empty placeholders, kept for file compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFilePaths {
    #[serde(default)]
    pub passport: String,
    #[serde(default)]
    pub signature: String,
}

/// Client and device details captured at registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetadata {
    pub device_type: String,
    pub os: String,
    pub browser: String,
    pub screen_resolution: String,
    pub ip: String,
    pub location: String,
    /// RFC 3339 timestamp of the registration.
    pub timestamp: String,
}

/// One entry in the resource catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub resource_id: ResourceId,
    pub resource_details: ResourceDetails,
    pub uploader_details: UploaderDetails,
    /// Path of the stored blob, relative to the uploads root's parent.
    pub file_path: String,
    pub metadata: ResourceMetadata,
}

/// Title and description of a resource. Both are required and non-empty
/// after trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDetails {
    pub title: String,
    pub description: String,
}

/// Identity of the user who uploaded a resource. Ownership checks
/// compare the acting principal's email against `email` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploaderDetails {
    pub name: String,
    pub email: EmailAddress,
}

/// Upload-time metadata of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    /// RFC 3339 timestamp of the upload.
    pub timestamp: String,
    /// Declared content type of the stored blob.
    pub file_type: String,
    /// Size of the stored blob in bytes.
    pub file_size: u64,
}
