//! Flat-file catalog implementation.
//!
//! Composes the record stores, the ownership guard, the blob store, and
//! the credential hasher into the domain operations of the portal. Two
//! independent stores back the catalog (`user.txt`, `resource.txt`);
//! they never interact.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use lectern_core::error::{Error, ValidationError};
use lectern_core::guard::authorize_owner;
use lectern_core::records::{
    ClientMetadata, PersonalDetails, ResourceDetails, ResourceMetadata, ResourceRecord,
    UploaderDetails, UserFilePaths, UserRecord,
};
use lectern_core::traits::{BlobStore, Catalog, CredentialHasher, NewResource, NewUser, Scope};
use lectern_core::types::{EmailAddress, Principal, ResourceId, Role};
use lectern_core::{ClientInfo, RegisteredUser, Result, client};

use crate::blob::FileBlobStore;
use crate::hasher::BcryptHasher;
use crate::store::RecordStore;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

const USER_FILE: &str = "user.txt";
const RESOURCE_FILE: &str = "resource.txt";
const UPLOADS_DIR: &str = "uploads";

/// Flat-file [`Catalog`] rooted at a data directory holding `user.txt`,
/// `resource.txt`, and `uploads/`.
#[derive(Debug, Clone)]
pub struct FileCatalog<H = BcryptHasher> {
    users: RecordStore<UserRecord>,
    resources: RecordStore<ResourceRecord>,
    blobs: FileBlobStore,
    hasher: H,
}

impl FileCatalog<BcryptHasher> {
    /// Create a catalog at the given root with the default bcrypt
    /// hasher.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_hasher(root, BcryptHasher::default())
    }
}

impl<H: CredentialHasher> FileCatalog<H> {
    /// Create a catalog at the given root with a custom hasher.
    pub fn with_hasher(root: impl AsRef<Path>, hasher: H) -> Self {
        let root = root.as_ref();
        Self {
            users: RecordStore::new(root.join(USER_FILE)),
            resources: RecordStore::new(root.join(RESOURCE_FILE)),
            blobs: FileBlobStore::new(root.join(UPLOADS_DIR)),
            hasher,
        }
    }

    /// The user directory store.
    pub fn users(&self) -> &RecordStore<UserRecord> {
        &self.users
    }

    /// The resource catalog store.
    pub fn resources(&self) -> &RecordStore<ResourceRecord> {
        &self.resources
    }

    fn build_user_record(
        &self,
        full_name: &str,
        email: EmailAddress,
        role: Role,
        password_hash: String,
        client_info: &ClientInfo,
    ) -> UserRecord {
        let (first_name, last_name) = split_full_name(full_name);
        let agent = client::parse_user_agent(&client_info.user_agent);

        UserRecord {
            personal_details: PersonalDetails {
                matric_number: generate_matric_number(first_name),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email,
                role,
                phone_number: String::new(),
                password_hash,
            },
            file_paths: UserFilePaths::default(),
            metadata: ClientMetadata {
                device_type: agent.device_type.to_string(),
                os: agent.os.to_string(),
                browser: agent.browser.to_string(),
                screen_resolution: client_info.screen_resolution.clone(),
                ip: client_info.ip.clone(),
                location: client_info.location.clone(),
                timestamp: Utc::now().to_rfc3339(),
            },
        }
    }
}

#[async_trait]
impl<H: CredentialHasher> Catalog for FileCatalog<H> {
    #[instrument(skip_all, fields(email = %new_user.email))]
    async fn register(&self, new_user: NewUser) -> Result<RegisteredUser> {
        let full_name = new_user.full_name.trim().to_string();
        if full_name.is_empty()
            || new_user.email.trim().is_empty()
            || new_user.password.is_empty()
            || new_user.role.trim().is_empty()
        {
            return Err(ValidationError::MissingFields.into());
        }

        let email = EmailAddress::new(&new_user.email)?;
        if new_user.password.len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }
        if new_user.password != new_user.confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        let role: Role = new_user.role.parse()?;

        let password_hash = self.hasher.hash(&new_user.password)?;
        let record =
            self.build_user_record(&full_name, email.clone(), role, password_hash, &new_user.client);

        // The uniqueness check and the append run under one lock, so a
        // concurrent registration of the same email cannot slip through.
        let appended = self.users.append_unless(&record, |existing| {
            existing.personal_details.email.matches_ignore_case(email.as_str())
        })?;
        if !appended {
            return Err(Error::Conflict {
                message: "An account with this email already exists.".to_string(),
            });
        }

        debug!(matric = %record.personal_details.matric_number, "Registered user");
        Ok(RegisteredUser {
            matric_number: record.personal_details.matric_number,
            email,
            role,
        })
    }

    #[instrument(skip_all)]
    async fn authenticate(&self, email: &str, password: &str) -> Result<Principal> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let Some(user) = self
            .users
            .find(|u| u.personal_details.email.matches_ignore_case(email))?
        else {
            return Err(Error::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(password, &user.personal_details.password_hash)?
        {
            return Err(Error::InvalidCredentials);
        }

        debug!(email = %user.personal_details.email, "Authenticated");
        Ok(Principal {
            name: user.personal_details.first_name.clone(),
            email: user.personal_details.email.clone(),
            role: user.personal_details.role,
        })
    }

    #[instrument(skip(self))]
    async fn list_resources(&self, scope: Scope) -> Result<Vec<ResourceRecord>> {
        let mut resources = self.resources.load_all()?;
        match scope {
            Scope::All => Ok(resources),
            Scope::OwnedBy(email) => {
                resources.retain(|r| r.uploader_details.email.as_str() == email.as_str());
                // Lecturer view: most recently appended first.
                resources.reverse();
                Ok(resources)
            }
        }
    }

    #[instrument(skip_all, fields(title = %new_resource.title))]
    async fn upload_resource(
        &self,
        new_resource: NewResource,
        principal: &Principal,
    ) -> Result<ResourceRecord> {
        let title = new_resource.title.trim();
        let description = new_resource.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(ValidationError::MissingResourceDetails.into());
        }

        let blob_path = self
            .blobs
            .store(&new_resource.bytes, &new_resource.file_name)?;

        let record = ResourceRecord {
            resource_id: generate_resource_id()?,
            resource_details: ResourceDetails {
                title: title.to_string(),
                description: description.to_string(),
            },
            uploader_details: UploaderDetails {
                name: principal.name.clone(),
                email: principal.email.clone(),
            },
            file_path: blob_path.to_string_lossy().into_owned(),
            metadata: ResourceMetadata {
                timestamp: Utc::now().to_rfc3339(),
                file_type: new_resource.content_type.clone(),
                file_size: new_resource.bytes.len() as u64,
            },
        };

        if let Err(err) = self.resources.append(&record) {
            // The blob landed but its record did not: compensate so no
            // orphan survives. Best-effort only.
            if let Err(cleanup) = self.blobs.delete(&blob_path) {
                warn!(
                    path = %blob_path.display(),
                    error = %cleanup,
                    "Failed to remove orphaned upload"
                );
            }
            return Err(err);
        }

        debug!(id = %record.resource_id, "Uploaded resource");
        Ok(record)
    }

    #[instrument(skip(self, title, description, principal))]
    async fn edit_resource(
        &self,
        id: &str,
        title: &str,
        description: &str,
        principal: &Principal,
    ) -> Result<()> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(ValidationError::EmptyResourceDetails.into());
        }

        let found = self.resources.rewrite_where(
            |r| r.resource_id.as_str() == id,
            |mut record| {
                authorize_owner(record.uploader_details.email.as_str(), principal)?;
                record.resource_details.title = title.to_string();
                record.resource_details.description = description.to_string();
                Ok(Some(record))
            },
        )?;

        if !found {
            return Err(Error::NotFound { what: "Resource" });
        }
        debug!(id, "Edited resource");
        Ok(())
    }

    #[instrument(skip(self, principal))]
    async fn delete_resource(&self, id: &str, principal: &Principal) -> Result<()> {
        let mut blob_paths: Vec<String> = Vec::new();

        let found = self.resources.rewrite_where(
            |r| r.resource_id.as_str() == id,
            |record| {
                authorize_owner(record.uploader_details.email.as_str(), principal)?;
                blob_paths.push(record.file_path.clone());
                Ok(None)
            },
        )?;

        if !found {
            return Err(Error::NotFound { what: "Resource" });
        }

        // Record removal is the primary outcome; losing the blob cleanup
        // must not undo it.
        for path in blob_paths {
            if path.is_empty() {
                continue;
            }
            if let Err(err) = self.blobs.delete(Path::new(&path)) {
                warn!(path = %path, error = %err, "Failed to remove stored file for deleted resource");
            }
        }

        debug!(id, "Deleted resource");
        Ok(())
    }
}

/// Split a full name on the first space into first and last name. The
/// last name may be empty.
fn split_full_name(full_name: &str) -> (&str, &str) {
    match full_name.split_once(' ') {
        Some((first, last)) => (first, last.trim()),
        None => (full_name, ""),
    }
}

/// Derive the weak pseudo-identifier: the first two letters of the
/// first name, uppercased, plus a random three-digit number.
fn generate_matric_number(first_name: &str) -> String {
    let prefix: String = first_name.chars().take(2).collect::<String>().to_uppercase();
    let digits = (Uuid::new_v4().as_u128() % 900) as u16 + 100;
    format!("{}{}", prefix, digits)
}

/// Generate a fresh resource id: unix seconds plus a random hex
/// component, making collisions negligible.
fn generate_resource_id() -> Result<ResourceId> {
    let uuid = Uuid::new_v4().simple().to_string();
    ResourceId::new(format!("res_{}_{}", Utc::now().timestamp(), &uuid[..8]))
}
