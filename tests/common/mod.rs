//! Shared fixture for CLI integration tests.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A temp project with a `berth/` workspace, a snapshot store, and an
/// isolated config path.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new(store: Value) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let project = Self { dir };
        project.write(
            "store.json",
            &serde_json::to_string_pretty(&store).expect("serialize store"),
        );
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("config/config.json")
    }

    pub fn write(&self, rel: &str, contents: &str) -> &Self {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents.as_bytes()).expect("write file");
        self
    }

    /// Run `berth` against this project with stdin closed.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_berth"))
            .arg("--workspace")
            .arg(self.root())
            .arg("--store")
            .arg(self.root().join("store.json"))
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .env_remove("BERTH_STORE")
            .env_remove("BERTH_LOG")
            .stdin(Stdio::null())
            .output()
            .expect("run berth")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
