//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce workspace rules:
//! - No panicking shortcuts (`unwrap()`, `expect(`) in navigator core production code
//! - No direct printing from the core library (it logs through `tracing`)
//! - No sleeping anywhere in the synchronous navigator
//!
//! The helpers here walk the workspace sources and strip test code so the
//! checks only look at what ships.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A single line of production code
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Line contents with trailing `//` comments removed
    pub code: String,
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.number, self.code.trim())
    }
}

/// Root of the workspace (two levels above this package)
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// Production lines of every `.rs` file under `dir` (relative to the workspace root)
///
/// Everything from the first `#[cfg(test)]` onward is treated as test code,
/// which matches how the workspace lays out its unit tests. Comment lines are
/// skipped.
#[must_use]
pub fn production_lines(dir: &str) -> Vec<SourceLine> {
    let root = workspace_root().join(dir);
    if !root.exists() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for entry in walkdir::WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("#[cfg(test)]") {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }
            let code = line.split("//").next().unwrap_or(line).to_string();
            lines.push(SourceLine {
                path: path.to_path_buf(),
                number: idx + 1,
                code,
            });
        }
    }
    lines
}

/// Production lines under `dir` containing any of `patterns`
#[must_use]
pub fn find_violations(dir: &str, patterns: &[&str]) -> Vec<SourceLine> {
    production_lines(dir)
        .into_iter()
        .filter(|line| patterns.iter().any(|p| line.code.contains(p)))
        .collect()
}
