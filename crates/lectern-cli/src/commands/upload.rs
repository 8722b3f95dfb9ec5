//! Upload command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lectern_core::{Catalog, NewResource, Outcome};
use lectern_file::FileCatalog;

use crate::commands::authenticate;
use crate::output;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Resource title
    #[arg(long)]
    pub title: String,

    /// Resource description
    #[arg(long)]
    pub description: String,

    /// File to upload
    #[arg(long)]
    pub file: PathBuf,

    /// Declared content type of the file
    #[arg(long, default_value = "application/octet-stream")]
    pub content_type: String,

    /// Uploader email address
    #[arg(long)]
    pub email: String,

    /// Uploader password
    #[arg(long)]
    pub password: String,
}

pub async fn run(catalog: &FileCatalog, json: bool, args: UploadArgs) -> Result<()> {
    let principal = authenticate(catalog, json, &args.email, &args.password).await?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();

    let result = catalog
        .upload_resource(
            NewResource {
                title: args.title,
                description: args.description,
                file_name,
                content_type: args.content_type,
                bytes,
            },
            &principal,
        )
        .await;

    let outcome = Outcome::from_result(result, "Resource uploaded successfully!");
    output::emit(json, &outcome, |resource| {
        output::field("Resource ID", resource.resource_id.as_str());
        output::field("Stored at", &resource.file_path);
    })
}
