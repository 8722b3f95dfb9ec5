//! Register command implementation.

use anyhow::Result;
use clap::Args;

use lectern_core::{Catalog, ClientInfo, NewUser, Outcome};
use lectern_file::FileCatalog;

use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Full name, e.g. "Ada Lovelace"
    #[arg(long)]
    pub name: String,

    /// Email address (must be unique in the directory)
    #[arg(long)]
    pub email: String,

    /// Password (minimum 6 characters)
    #[arg(long)]
    pub password: String,

    /// Password confirmation; defaults to the password itself
    #[arg(long)]
    pub confirm_password: Option<String>,

    /// Account role: student or lecturer
    #[arg(long)]
    pub role: String,
}

pub async fn run(catalog: &FileCatalog, json: bool, args: RegisterArgs) -> Result<()> {
    let confirm_password = args.confirm_password.unwrap_or_else(|| args.password.clone());

    let result = catalog
        .register(NewUser {
            full_name: args.name,
            email: args.email,
            password: args.password,
            confirm_password,
            role: args.role,
            client: client_info(),
        })
        .await;

    let outcome = Outcome::from_result(result, "Registration successful!");
    output::emit(json, &outcome, |user| {
        output::field("Matric number", &user.matric_number);
        output::field("Email", user.email.as_str());
        output::field("Role", user.role.as_str());
    })
}

fn client_info() -> ClientInfo {
    ClientInfo {
        user_agent: format!("lectern-cli/{}", env!("CARGO_PKG_VERSION")),
        ip: "local".to_string(),
        screen_resolution: "Unknown".to_string(),
        location: "Unknown".to_string(),
    }
}
