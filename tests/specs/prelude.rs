//! Shared helpers for CLI specs
//!
//! `Project` is a scratch directory; `drift()` runs the binary inside it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::OnceLock;
use tempfile::TempDir;

/// A minimal coverage change set with two groups
pub const COVERAGE: &str = "\
resource-id: 10001
definition-id: 7
definition-name: etc-config
basedir: /etc
type: C
version: 0

. 2
h1 0 hosts A
p1 0 passwd A

ssh 1
s1 0 sshd_config A

";

/// A drift change set following `COVERAGE`
pub const DRIFT: &str = "\
definition-name: etc-config
basedir: /etc
type: D
version: 1

. 2
h2 h1 hosts C
0 p1 passwd R

";

fn drift_bin() -> &'static Path {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        let path = assert_cmd::cargo::cargo_bin("drift");
        if !path.exists() {
            let mut build = std::process::Command::new(env!("CARGO"));
            build.args(["build", "-p", "drift", "--bin", "drift"]);
            if !cfg!(debug_assertions) {
                build.arg("--release");
            }
            let status = build.status().expect("failed to run cargo build");
            assert!(status.success(), "building drift failed");
        }
        path
    })
}

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parents
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.path().join(rel)).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    /// Write a definition for `tracked/` with its store at `store/`
    pub fn definition(&self, mode: &str) {
        let basedir = self.path().join("tracked");
        std::fs::create_dir_all(&basedir).unwrap();
        self.file(
            "etc.toml",
            &format!(
                "name = \"etc\"\nbasedir = {:?}\nresource_id = 5\nhandling_mode = {:?}\n",
                basedir.display().to_string(),
                mode
            ),
        );
    }

    pub fn detect(&self) -> CliBuilder {
        self.drift()
            .args(&["detect", "--definition", "etc.toml", "--store", "store"])
    }

    pub fn drift(&self) -> CliBuilder {
        CliBuilder {
            args: Vec::new(),
            dir: self.path().to_path_buf(),
            env: Vec::new(),
        }
    }
}

pub struct CliBuilder {
    args: Vec<String>,
    dir: PathBuf,
    env: Vec<(String, String)>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Run without asserting on the exit status
    pub fn output(self) -> Output {
        let mut cmd = Command::new(drift_bin());
        cmd.args(&self.args).current_dir(&self.dir).env_remove("DRIFT_LOG");
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.output().unwrap()
    }

    /// Run and require exit code 0
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstderr: {}",
            run.output.status.code(),
            run.stderr()
        );
        run
    }

    /// Run and require exit code 1
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        let run = RunAssert { output };
        assert_eq!(
            run.output.status.code(),
            Some(1),
            "expected exit 1\nstdout: {}",
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            predicate::str::contains(needle).eval(&stdout),
            "stdout lacks {needle:?}:\n{stdout}"
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            predicate::str::contains(needle).not().eval(&stdout),
            "stdout has {needle:?}:\n{stdout}"
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            predicate::str::contains(needle).eval(&stderr),
            "stderr lacks {needle:?}:\n{stderr}"
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
