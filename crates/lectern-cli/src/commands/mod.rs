//! Subcommand implementations.

pub mod delete;
pub mod edit;
pub mod list;
pub mod login;
pub mod register;
pub mod upload;

use anyhow::Result;

use lectern_core::{Catalog, Outcome, Principal};
use lectern_file::FileCatalog;

use crate::output;

/// Authenticate the acting principal for an owner-scoped command.
///
/// On failure the uniform invalid-credentials outcome is emitted and
/// the process exits non-zero.
pub(crate) async fn authenticate(
    catalog: &FileCatalog,
    json: bool,
    email: &str,
    password: &str,
) -> Result<Principal> {
    match catalog.authenticate(email, password).await {
        Ok(principal) => Ok(principal),
        Err(err) => {
            output::emit::<()>(json, &Outcome::error(err.to_string()), |_| {})?;
            unreachable!("emit exits on error outcomes");
        }
    }
}
