//! End-to-end tests driving the built binary against a temp data dir.

mod common;

use std::fs;

use tempfile::TempDir;

use common::{register_lecturer, run_cli, run_cli_success};

#[test]
fn register_and_login() {
    let dir = TempDir::new().unwrap();
    register_lecturer(dir.path());

    let stdout = run_cli_success(
        dir.path(),
        &[
            "login",
            "--email",
            "LECTURER@X.COM",
            "--password",
            "secret1",
        ],
    );
    assert!(stdout.contains("Grace"));
    assert!(stdout.contains("lecturer"));
    assert!(stdout.contains("Login successful!"));
}

#[test]
fn duplicate_registration_is_rejected() {
    let dir = TempDir::new().unwrap();
    register_lecturer(dir.path());

    let output = run_cli(
        dir.path(),
        &[
            "register",
            "--name",
            "Grace Hopper",
            "--email",
            "Lecturer@x.com",
            "--password",
            "secret1",
            "--role",
            "lecturer",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("An account with this email already exists."));
}

#[test]
fn wrong_password_gets_the_uniform_message() {
    let dir = TempDir::new().unwrap();
    register_lecturer(dir.path());

    let output = run_cli(
        dir.path(),
        &["login", "--email", "lecturer@x.com", "--password", "wrong"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid email or password."));
}

#[test]
fn upload_edit_delete_flow() {
    let dir = TempDir::new().unwrap();
    register_lecturer(dir.path());

    let file = dir.path().join("syllabus.pdf");
    fs::write(&file, b"%PDF-1.4").unwrap();

    let auth = ["--email", "lecturer@x.com", "--password", "secret1"];

    let mut upload_args = vec![
        "upload",
        "--title",
        "Syllabus",
        "--description",
        "Week 1",
        "--file",
        file.to_str().unwrap(),
        "--content-type",
        "application/pdf",
    ];
    upload_args.extend_from_slice(&auth);
    let stdout = run_cli_success(dir.path(), &upload_args);
    assert!(stdout.contains("Resource uploaded successfully!"));

    let id_line = stdout
        .lines()
        .find(|line| line.contains("res_"))
        .expect("upload output should name the resource id");
    let id = id_line
        .split_whitespace()
        .find(|word| word.starts_with("res_"))
        .unwrap()
        .to_string();

    let mut list_args = vec!["list", "--mine"];
    list_args.extend_from_slice(&auth);
    let stdout = run_cli_success(dir.path(), &list_args);
    assert!(stdout.contains("Syllabus"));

    let mut edit_args = vec!["edit", &id, "--title", "Updated", "--description", "Week 2"];
    edit_args.extend_from_slice(&auth);
    run_cli_success(dir.path(), &edit_args);

    let stdout = run_cli_success(dir.path(), &["list"]);
    assert!(stdout.contains("Updated"));
    assert!(!stdout.contains("Syllabus"));

    let mut delete_args = vec!["delete", &id];
    delete_args.extend_from_slice(&auth);
    run_cli_success(dir.path(), &delete_args);

    let stdout = run_cli_success(dir.path(), &["list"]);
    assert!(stdout.contains("No resources have been uploaded yet."));
}

#[test]
fn edit_by_non_owner_is_forbidden() {
    let dir = TempDir::new().unwrap();
    register_lecturer(dir.path());
    run_cli_success(
        dir.path(),
        &[
            "register",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@x.com",
            "--password",
            "secret1",
            "--role",
            "student",
        ],
    );

    let file = dir.path().join("notes.txt");
    fs::write(&file, b"notes").unwrap();
    let stdout = run_cli_success(
        dir.path(),
        &[
            "upload",
            "--title",
            "Notes",
            "--description",
            "All of them",
            "--file",
            file.to_str().unwrap(),
            "--email",
            "lecturer@x.com",
            "--password",
            "secret1",
        ],
    );
    let id = stdout
        .split_whitespace()
        .find(|word| word.starts_with("res_"))
        .unwrap()
        .to_string();

    let output = run_cli(
        dir.path(),
        &[
            "edit",
            &id,
            "--title",
            "Hijacked",
            "--description",
            "x",
            "--email",
            "ada@x.com",
            "--password",
            "secret1",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You are not authorized to modify this resource."));
}

#[test]
fn json_envelope_has_the_uniform_shape() {
    let dir = TempDir::new().unwrap();

    let stdout = run_cli_success(
        dir.path(),
        &[
            "--json",
            "register",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@x.com",
            "--password",
            "secret1",
            "--role",
            "student",
        ],
    );
    let envelope: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["message"], "Registration successful!");
    assert_eq!(envelope["data"]["email"], "ada@x.com");

    let output = run_cli(dir.path(), &["--json", "list", "--mine"]);
    // --mine without credentials is a clap usage error.
    assert!(!output.status.success());
}
