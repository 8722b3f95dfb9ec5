//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use lectern_core::Outcome;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Render an outcome: either the JSON envelope or human output via
/// `render`, then exit non-zero on error so scripts can branch on the
/// status.
pub fn emit<T: Serialize>(
    as_json: bool,
    outcome: &Outcome<T>,
    render: impl FnOnce(&T),
) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else if outcome.is_success() {
        if let Some(data) = &outcome.data {
            render(data);
        }
        success(&outcome.message);
    } else {
        error(&outcome.message);
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
