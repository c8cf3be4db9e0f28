//! File edit security checking
//!
//! Edits can only be allowed or blocked. Zero-access paths are checked
//! before read-only paths; no-delete paths do not apply to edits.

use crate::engine::paths::{self, MatchMode};
use crate::output::Decision;
use crate::rules::RuleSet;

/// Check an edit target against the rule set
pub fn check_path(file_path: &str, rules: &RuleSet) -> Decision {
    if let Some(pattern) = paths::first_match(file_path, rules.zero_access_paths(), MatchMode::Edit) {
        return Decision::block(format!("Cannot edit protected file matching: {}", pattern));
    }

    if let Some(pattern) = paths::first_match(file_path, rules.read_only_paths(), MatchMode::Edit) {
        return Decision::block(format!("Cannot edit read-only file matching: {}", pattern));
    }

    Decision::Allow
}
