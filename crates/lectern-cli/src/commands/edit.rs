//! Edit command implementation.

use anyhow::Result;
use clap::Args;

use lectern_core::{Catalog, Outcome};
use lectern_file::FileCatalog;

use crate::commands::authenticate;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Resource identifier, e.g. res_1700000000_a1b2c3d4
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: String,

    /// New description
    #[arg(long)]
    pub description: String,

    /// Owner email address
    #[arg(long)]
    pub email: String,

    /// Owner password
    #[arg(long)]
    pub password: String,
}

pub async fn run(catalog: &FileCatalog, json: bool, args: EditArgs) -> Result<()> {
    let principal = authenticate(catalog, json, &args.email, &args.password).await?;

    let outcome: Outcome<()> = match catalog
        .edit_resource(&args.id, &args.title, &args.description, &principal)
        .await
    {
        Ok(()) => Outcome::success("Resource updated successfully."),
        Err(err) => Outcome::error(err.to_string()),
    };
    output::emit(json, &outcome, |_| {})
}
