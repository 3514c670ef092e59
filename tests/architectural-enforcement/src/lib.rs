//! Architectural Enforcement Integration Tests
//!
//! Source scans that keep the workspace honest:
//! - `switchboard-core` stays headless (no terminal UI crates)
//! - No blocking sleeps or blocking HTTP in production code
//!
//! The helpers here walk a source tree and yield production code lines,
//! stopping at the first `#[cfg(test)]` of each file and skipping comments.

use std::fs;
use std::path::{Path, PathBuf};

/// One line of production code
#[derive(Debug)]
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// The line, trimmed
    pub text: String,
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.number, self.text)
    }
}

/// Workspace root, two levels above this crate
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Every non-comment, non-test line of the `.rs` files under `dir`
pub fn production_lines(dir: &Path) -> Vec<SourceLine> {
    let mut lines = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
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
            let trimmed = line.trim();
            if trimmed.starts_with("#[cfg(test)]") {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }
            lines.push(SourceLine {
                path: path.to_path_buf(),
                number: idx + 1,
                text: trimmed.to_string(),
            });
        }
    }

    lines
}

/// Lines under `dir` containing any of `needles`
pub fn find_violations(dir: &Path, needles: &[&str]) -> Vec<SourceLine> {
    production_lines(dir)
        .into_iter()
        .filter(|line| needles.iter().any(|n| line.text.contains(n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_comments_and_test_modules() {
        let dir = std::env::temp_dir().join(format!("arch-enforcement-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("sample.rs"),
            "// uses ratatui\nfn real() {}\n#[cfg(test)]\nmod tests { use ratatui; }\n",
        )
        .unwrap();

        let lines = production_lines(&dir);
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 2);
        assert_eq!(lines[0].text, "fn real() {}");
    }
}
