// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

pub const OUTPUT_FILE: &str = "ssca1_times.dat";

/// Render an SSCA#1 log the way the benchmark prints it: data generation,
/// Kernel 1 and Kernel 2 timings, each as `(h, m, s, ms)`
pub fn ssca1_log(threads: u32, timings: &[(u64, u64, u64, u64)]) -> String {
    let mut log = String::from(
        "HPCS SSCA #1 Bioinformatics Sequence Alignment Executable Specification:\nRunning...\n",
    );
    log.push_str(&format!("Running with OpenMP, thread count: {}\n", threads));
    log.push_str("Using seed 1234\n\nScalable Data Generator - genScalData() beginning execution...\n");
    for (h, m, s, ms) in timings {
        log.push_str(&format!(
            "\n\tElapsed time: {} hour(s), {} minute(s), {} second(s), {} milliseconds,  12 micro second(s).\n",
            h, m, s, ms
        ));
        log.push_str("\nBegining Kernel execution.\n");
    }
    log
}

/// A scratch working directory holding log files and an index
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write an index listing `entries` verbatim, one per line
    pub fn write_index(&self, entries: &[&str]) -> PathBuf {
        self.write("index.txt", entries.join("\n"))
    }

    pub fn output(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join(OUTPUT_FILE)).ok()
    }
}

/// Run the binary inside `cwd` with the given arguments
pub fn run_ssca1_times(cwd: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_ssca1-times"))
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute ssca1-times");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}
