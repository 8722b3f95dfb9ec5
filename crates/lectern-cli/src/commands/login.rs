//! Login command implementation.
//!
//! There is no session layer: this verifies credentials and prints the
//! matched identity. Owner-scoped commands authenticate per invocation.

use anyhow::Result;
use clap::Args;

use lectern_core::{Catalog, Outcome};
use lectern_file::FileCatalog;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address (matched case-insensitively)
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(catalog: &FileCatalog, json: bool, args: LoginArgs) -> Result<()> {
    let result = catalog.authenticate(&args.email, &args.password).await;

    let outcome = Outcome::from_result(result, "Login successful!");
    output::emit(json, &outcome, |principal| {
        output::field("Name", &principal.name);
        output::field("Email", principal.email.as_str());
        output::field("Role", principal.role.as_str());
    })
}
