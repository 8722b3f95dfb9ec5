//! Delete command implementation.

use anyhow::Result;
use clap::Args;

use lectern_core::{Catalog, Outcome};
use lectern_file::FileCatalog;

use crate::commands::authenticate;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource identifier, e.g. res_1700000000_a1b2c3d4
    pub id: String,

    /// Owner email address
    #[arg(long)]
    pub email: String,

    /// Owner password
    #[arg(long)]
    pub password: String,
}

pub async fn run(catalog: &FileCatalog, json: bool, args: DeleteArgs) -> Result<()> {
    let principal = authenticate(catalog, json, &args.email, &args.password).await?;

    let outcome: Outcome<()> = match catalog.delete_resource(&args.id, &principal).await {
        Ok(()) => Outcome::success("Resource deleted successfully."),
        Err(err) => Outcome::error(err.to_string()),
    };
    output::emit(json, &outcome, |_| {})
}
