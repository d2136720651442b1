//! Integration Test: Production Code Policy
//!
//! **Policy**: The navigator core never panics on behalf of its host and never
//! writes to stdout/stderr directly. Unknown identities, duplicates and empty
//! history are logged and ignored, so there is no reason to reach for
//! `unwrap()` outside tests.
//!
//! **Exceptions**: test code (`#[cfg(test)]` modules, `tests/` directories).

use architectural_enforcement::{find_violations, production_lines, SourceLine};

fn report(title: &str, violations: &[SourceLine]) {
    if violations.is_empty() {
        return;
    }
    eprintln!("\n{title}\n");
    for violation in violations {
        eprintln!("  {violation}");
    }
    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[test]
fn test_core_sources_are_scanned() {
    // Guards against the checks below passing because the path moved
    assert!(
        !production_lines("navigator/core/src").is_empty(),
        "navigator/core/src not found from the workspace root"
    );
}

#[test]
fn test_no_unwrap_in_core() {
    let violations = find_violations("navigator/core/src", &[".unwrap()", ".expect("]);
    report(
        "unwrap()/expect() found in navigator core production code:",
        &violations,
    );
}

#[test]
fn test_no_printing_in_core() {
    let violations = find_violations(
        "navigator/core/src",
        &["println!", "eprintln!", "print!(", "dbg!("],
    );
    report(
        "Direct printing found in navigator core (use tracing):",
        &violations,
    );
}

#[test]
fn test_no_sleep_in_navigator() {
    let mut violations = find_violations("navigator/core/src", &["::sleep(", ".sleep("]);
    violations.extend(find_violations("navigator/cli/src", &["::sleep(", ".sleep("]));
    report(
        "Sleep calls found; the navigator is synchronous and never waits:",
        &violations,
    );
}
