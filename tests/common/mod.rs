//! Shared test infrastructure for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A complete entry that passes every structural check.
pub const COMPLETE_ENTRY: &str = "## 2026-03-02 (Monday)

### What happened today
- shipped the parser

### What I'm grateful for
- coffee

### What I'm looking forward to
- Short-term: weekend
- Long-term: trip

## Signals
- \u{2b06}\u{fe0f} Helped today: sleep
- \u{2b07}\u{fe0f} Hurt today: meetings

## One adjustment (tomorrow)
- walk at lunch

### Final score (1/5)
- 4/5

---
";

/// A journal file in its own temporary directory.
pub struct JournalFixture {
    _dir: TempDir,
    pub journal: PathBuf,
}

impl JournalFixture {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let journal = dir.path().join("journal.md");
        std::fs::write(&journal, contents).expect("write journal");
        Self { _dir: dir, journal }
    }

    /// Path for an auxiliary file next to the journal.
    pub fn path(&self, name: &str) -> PathBuf {
        self.journal.with_file_name(name)
    }

    pub fn contents(&self) -> String {
        std::fs::read_to_string(&self.journal).expect("read journal")
    }

    /// Run the binary on the journal with extra arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_journal-verify"))
            .arg(&self.journal)
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("run journal-verify")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
