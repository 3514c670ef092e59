//! Integration Test: Blocking Call Prohibition
//!
//! Actions run as tokio tasks next to the render loop. A blocking sleep or a
//! blocking HTTP call in production code would freeze every panel at once.

use architectural_enforcement::{find_violations, workspace_root};

const FORBIDDEN: &[&str] = &["thread::sleep", "reqwest::blocking"];

#[test]
fn test_no_blocking_calls_in_production_code() {
    let root = workspace_root();
    let mut violations = Vec::new();
    for dir in ["switchboard/core/src", "tui/src"] {
        let path = root.join(dir);
        assert!(path.exists(), "missing {}", path.display());
        violations.extend(find_violations(&path, FORBIDDEN));
    }

    if !violations.is_empty() {
        eprintln!("\n❌ Blocking calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ Use tokio::time::sleep().await and async reqwest instead");

        panic!(
            "\nFound {} blocking call(s) in production code.",
            violations.len()
        );
    }
}
