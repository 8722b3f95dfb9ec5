//! Catalog trait.

use async_trait::async_trait;

use crate::Result;
use crate::client::ClientInfo;
use crate::records::ResourceRecord;
use crate::types::{EmailAddress, Principal, Role};

/// A registration request, exactly as collected from the caller.
/// Validation happens inside [`Catalog::register`], not here.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Full name; split on the first space into first/last.
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Requested role, one of `student` or `lecturer`.
    pub role: String,
    /// Client details captured by the transport.
    pub client: ClientInfo,
}

/// Output from a successful registration.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RegisteredUser {
    /// The generated pseudo-identifier.
    pub matric_number: String,
    pub email: EmailAddress,
    pub role: Role,
}

/// An upload request. The blob is stored before the record is appended;
/// a failed append deletes the stored blob as compensation.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    /// Original file name, used (after sanitization) for the stored blob.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Which resources a listing returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every resource, in file (append) order. The student view.
    All,
    /// Resources whose uploader email matches exactly, most recent
    /// first. The lecturer view.
    OwnedBy(EmailAddress),
}

/// The catalog surface: domain operations over the user directory and
/// the resource catalog. Callers map results onto their own transport.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Register a new user. Fails with a validation error for bad
    /// input, or `Conflict` if the email is already registered
    /// (case-insensitive).
    async fn register(&self, new_user: NewUser) -> Result<RegisteredUser>;

    /// Authenticate by email (case-insensitive) and password. Unknown
    /// email and wrong password both fail with the same
    /// `InvalidCredentials` error.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Principal>;

    /// List resources for the given scope.
    async fn list_resources(&self, scope: Scope) -> Result<Vec<ResourceRecord>>;

    /// Store a blob and append the resource record describing it.
    async fn upload_resource(
        &self,
        new_resource: NewResource,
        principal: &Principal,
    ) -> Result<ResourceRecord>;

    /// Replace the title and description of an owned resource. All
    /// other fields, and all other records, are untouched.
    async fn edit_resource(
        &self,
        id: &str,
        title: &str,
        description: &str,
        principal: &Principal,
    ) -> Result<()>;

    /// Remove an owned resource and, best-effort, its stored blob.
    async fn delete_resource(&self, id: &str, principal: &Principal) -> Result<()>;
}
