//! List command implementation.

use anyhow::Result;
use chrono::DateTime;
use clap::Args;
use colored::Colorize;

use lectern_core::{Catalog, Outcome, ResourceRecord, Scope};
use lectern_file::FileCatalog;

use crate::commands::authenticate;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show only resources you uploaded, most recent first
    #[arg(long)]
    pub mine: bool,

    /// Email address, required with --mine
    #[arg(long, required_if_eq("mine", "true"))]
    pub email: Option<String>,

    /// Account password, required with --mine
    #[arg(long, required_if_eq("mine", "true"))]
    pub password: Option<String>,
}

pub async fn run(catalog: &FileCatalog, json: bool, args: ListArgs) -> Result<()> {
    let scope = if args.mine {
        let email = args.email.unwrap_or_default();
        let password = args.password.unwrap_or_default();
        let principal = authenticate(catalog, json, &email, &password).await?;
        Scope::OwnedBy(principal.email)
    } else {
        Scope::All
    };

    let result = catalog.list_resources(scope).await;
    let outcome = Outcome::from_result(result, "Resources listed.");
    output::emit(json, &outcome, |resources| {
        if resources.is_empty() {
            println!("{}", "No resources have been uploaded yet.".dimmed());
            return;
        }
        for resource in resources {
            print_resource(resource);
        }
    })
}

fn print_resource(resource: &ResourceRecord) {
    println!(
        "{}  {}",
        resource.resource_id.as_str().dimmed(),
        resource.resource_details.title.bold()
    );
    println!(
        "    {} · {} · {}",
        resource.uploader_details.name,
        display_date(&resource.metadata.timestamp),
        display_size(resource.metadata.file_size)
    );
}

fn display_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|date| date.format("%b %d, %Y").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn display_size(bytes: u64) -> String {
    if bytes >= 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
