//! Bash command security checking
//!
//! Commands are treated as plain text. Four checks run in a fixed order and
//! the first one that fires decides:
//!
//! 1. `bashToolPatterns` regexes (ask or block)
//! 2. `zeroAccessPaths` anywhere in the command
//! 3. `readOnlyPaths`, only when the command looks like it modifies something
//! 4. `noDeletePaths`, only when the command looks like it deletes something
//!
//! This is a substring/regex heuristic over the raw command. Quoting,
//! variables and subshells are not interpreted. Like every other comparison
//! here, indicator detection ignores case.

use regex::RegexBuilder;

use crate::engine::paths::{self, MatchMode};
use crate::output::Decision;
use crate::rules::{CommandPattern, RuleSet};

/// Substrings that suggest the command writes to or alters a file
pub const MODIFICATION_INDICATORS: &[&str] =
    &["rm ", "mv ", ">", ">>", "tee ", "sed -i", "chmod ", "chown "];

/// Substrings that suggest the command removes a file
pub const DELETION_INDICATORS: &[&str] = &["rm ", "rmdir ", "unlink ", "del "];

/// Check a bash command against the rule set
pub fn check_command(command: &str, rules: &RuleSet) -> Decision {
    if let Some(decision) = check_patterns(command, rules.bash_tool_patterns()) {
        return decision;
    }

    if let Some(pattern) = paths::first_match(command, rules.zero_access_paths(), MatchMode::Command) {
        return Decision::block(format!("Access to protected path blocked: {}", pattern));
    }

    if has_indicator(command, MODIFICATION_INDICATORS) {
        if let Some(pattern) =
            paths::first_match(command, rules.read_only_paths(), MatchMode::Command)
        {
            return Decision::block(format!("Modification of read-only path blocked: {}", pattern));
        }
    }

    if has_indicator(command, DELETION_INDICATORS) {
        if let Some(pattern) =
            paths::first_match(command, rules.no_delete_paths(), MatchMode::Command)
        {
            return Decision::block(format!("Deletion of protected path blocked: {}", pattern));
        }
    }

    Decision::Allow
}

/// Evaluate the command patterns in declaration order; first hit decides
fn check_patterns(command: &str, patterns: &[CommandPattern]) -> Option<Decision> {
    patterns
        .iter()
        .find(|rule| pattern_hits(rule, command))
        .map(|rule| {
            if rule.ask {
                Decision::ask(rule.reason.clone())
            } else {
                Decision::block(rule.reason.clone())
            }
        })
}

/// A rule whose regex does not compile, or is empty, never hits
fn pattern_hits(rule: &CommandPattern, command: &str) -> bool {
    if rule.pattern.is_empty() {
        return false;
    }
    match RegexBuilder::new(&rule.pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(command),
        Err(_) => false,
    }
}

fn has_indicator(command: &str, indicators: &[&str]) -> bool {
    let command = command.to_lowercase();
    indicators.iter().any(|i| command.contains(i))
}
