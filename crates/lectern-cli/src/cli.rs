//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{delete, edit, list, login, register, upload};

/// Flat-file catalog for a small teaching portal.
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print results as a JSON {status, message, data} envelope
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding user.txt, resource.txt, and uploads/
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new user account
    Register(register::RegisterArgs),

    /// Verify credentials and show the account identity
    Login(login::LoginArgs),

    /// List catalog resources
    List(list::ListArgs),

    /// Upload a resource file with its metadata
    Upload(upload::UploadArgs),

    /// Edit the title and description of an owned resource
    Edit(edit::EditArgs),

    /// Delete an owned resource and its stored file
    Delete(delete::DeleteArgs),
}
