//! Integration Test: Headless Core
//!
//! `switchboard-core` must build and run without a terminal. Anything that
//! draws belongs in the `tui` crate.

use architectural_enforcement::{find_violations, workspace_root};

#[test]
fn test_core_has_no_ui_framework() {
    let core = workspace_root().join("switchboard/core/src");
    assert!(core.exists(), "missing {}", core.display());

    let violations = find_violations(&core, &["ratatui", "crossterm"]);

    for violation in &violations {
        eprintln!("  ❌ {}", violation);
    }
    assert!(
        violations.is_empty(),
        "\nFound {} UI framework reference(s) in switchboard-core",
        violations.len()
    );
}

#[test]
fn test_core_manifest_has_no_ui_framework() {
    let manifest = std::fs::read_to_string(workspace_root().join("switchboard/core/Cargo.toml"))
        .expect("core manifest");

    assert!(!manifest.contains("ratatui"));
    assert!(!manifest.contains("crossterm"));
}
