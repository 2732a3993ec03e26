//! Classification of Alloy tool output.
//!
//! The module differ reports its verdict as free-form text. All knowledge of
//! that phrasing lives here so a tool upgrade touches a single constant.

/// Sentence printed by the module differ when both modules admit the same
/// instances within the analysis scope.
pub const EQUIVALENCE_MARKER: &str = "The two modules are equivalent.";

/// Whether combined differ output reports equivalence.
pub fn reports_equivalence(output: &str) -> bool {
    output.contains(EQUIVALENCE_MARKER)
}

/// Join captured streams the way they are inspected: stdout then stderr.
pub fn combine_streams(stdout: &str, stderr: &str) -> String {
    let mut combined = String::with_capacity(stdout.len() + stderr.len());
    combined.push_str(stdout);
    combined.push_str(stderr);
    combined
}

/// Whether an analyzer exit code means the model is well-formed.
pub fn is_valid_exit(exit_code: i32) -> bool {
    exit_code == 0
}
