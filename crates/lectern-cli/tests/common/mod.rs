use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary against an isolated data directory.
pub fn run_cli(data_dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lectern"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd.args(args);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let output = run_cli(data_dir, args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Register a lecturer account the mutation tests can act as.
pub fn register_lecturer(data_dir: &Path) {
    run_cli_success(
        data_dir,
        &[
            "register",
            "--name",
            "Grace Hopper",
            "--email",
            "lecturer@x.com",
            "--password",
            "secret1",
            "--role",
            "lecturer",
        ],
    );
}
