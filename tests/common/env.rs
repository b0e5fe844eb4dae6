//! Test environment builder for isolated registry testing.
//!
//! Provides `TestEnv` - a temp directory holding a `packages/` registry
//! root, with helpers to populate entries and run the CLI against it.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

use super::fixtures;

/// Result of running a CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated registry tree in a temp directory
pub struct TestEnv {
    dir: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("packages");
        fs::create_dir_all(&root).unwrap();
        Self { dir, root }
    }

    pub fn entry_dir(&self, entry: &str) -> PathBuf {
        self.root.join(entry)
    }

    /// Write an entry's `grimoire.json`, creating the directory
    pub fn write_manifest(&self, entry: &str, content: &str) {
        let dir = self.entry_dir(entry);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("grimoire.json"), content).unwrap();
    }

    /// Write one topic file under the entry's default topics directory
    pub fn write_topic(&self, entry: &str, file: &str, content: &str) {
        let topics = self.entry_dir(entry).join("topics");
        fs::create_dir_all(&topics).unwrap();
        fs::write(topics.join(file), content).unwrap();
    }

    /// Write a fully valid entry: manifest plus five topics
    pub fn write_valid_entry(&self, entry: &str, github: &str) {
        self.write_manifest(entry, &fixtures::manifest(github));
        for i in 0..5 {
            let slug = format!("topic-{i}");
            self.write_topic(entry, &format!("{slug}.md"), &fixtures::topic(&slug, i));
        }
    }

    /// Write a `registry.toml` at the registry root
    pub fn write_config(&self, content: &str) {
        fs::write(self.root.join("registry.toml"), content).unwrap();
    }

    /// Run the CLI with `--root` pointing at this registry
    pub fn run(&self, args: &[&str]) -> TestResult {
        let bin = env!("CARGO_BIN_EXE_grimreg");

        let output = Command::new(bin)
            .current_dir(self.dir.path())
            .arg("--root")
            .arg(&self.root)
            .args(args)
            .output()
            .unwrap();

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
