use std::process::{Command, Output};
use tempfile::TempDir;

pub fn base_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_repolist"));
    for (key, _) in std::env::vars() {
        if key.starts_with("REPOLIST_") {
            cmd.env_remove(key);
        }
    }
    cmd.env("DOTENV_PATH", data_dir.path().join("missing.env"))
        .env("RUST_LOG", "warn")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

pub fn run(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("run repolist");
    assert!(output.status.success(), "{:?}", output);
    output
}

pub fn add_repo(data_dir: &TempDir, name: &str, last_change: &str, extra: &[&str]) {
    run(base_cmd(data_dir)
        .args(["repo", "add", "--name", name, "--last-change", last_change])
        .args(extra));
}

pub fn list_json(data_dir: &TempDir, global: &[&str], args: &[&str]) -> serde_json::Value {
    let output = run(base_cmd(data_dir)
        .args(global)
        .args(["list", "--json"])
        .args(args));
    serde_json::from_slice(&output.stdout).expect("listing is JSON")
}

pub fn entry_labels(listing: &serde_json::Value) -> Vec<String> {
    listing["entries"]
        .as_array()
        .expect("entries array")
        .iter()
        .map(|entry| match entry["kind"].as_str() {
            Some("group") => format!("[{}]", entry["name"].as_str().unwrap_or_default()),
            _ => entry["name"].as_str().unwrap_or_default().to_string(),
        })
        .collect()
}
