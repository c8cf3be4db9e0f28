//! Path pattern matching
//!
//! Patterns come in two shapes. A pattern containing `*` is a glob: `.` is
//! escaped, `*` becomes `.*`, and the result is searched (unanchored) in the
//! raw text. Anything else is a literal, found as a substring either in its
//! `~`/`$VAR`-expanded form or as written. Edit targets additionally match
//! when the path ends with the pattern.
//!
//! All comparisons ignore case.

use regex::RegexBuilder;

/// Which guard is asking, since the two normalize differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Free-form shell command text
    Command,

    /// A single file path
    Edit,
}

/// Expand `$VAR`/`${VAR}` and a leading `~`. Unknown variables are left as written.
pub fn expand(text: &str) -> String {
    let vars = shellexpand::env_with_context_no_errors(text, |var: &str| std::env::var(var).ok());
    shellexpand::tilde(&vars).into_owned()
}

/// Translate a glob pattern into a regex string
fn glob_to_regex(pattern: &str) -> String {
    pattern.replace('.', r"\.").replace('*', ".*")
}

/// Return the first pattern, in declaration order, that matches `text`.
pub fn first_match<'p>(text: &str, patterns: &'p [String], mode: MatchMode) -> Option<&'p str> {
    let raw_lower = text.to_lowercase();
    let expanded_lower = expand(text).to_lowercase();

    patterns
        .iter()
        .map(String::as_str)
        .find(|pattern| pattern_matches(pattern, &raw_lower, &expanded_lower, mode))
}

/// Convenience wrapper returning `(matched, pattern)`
pub fn matches<'p>(text: &str, patterns: &'p [String], mode: MatchMode) -> (bool, Option<&'p str>) {
    let hit = first_match(text, patterns, mode);
    (hit.is_some(), hit)
}

fn pattern_matches(pattern: &str, raw_lower: &str, expanded_lower: &str, mode: MatchMode) -> bool {
    if pattern.is_empty() {
        return false;
    }

    if pattern.contains('*') {
        // A glob that is not a valid regex after translation is skipped
        return RegexBuilder::new(&glob_to_regex(pattern))
            .case_insensitive(true)
            .build()
            .map(|re| re.is_match(raw_lower))
            .unwrap_or(false);
    }

    let pattern_lower = pattern.to_lowercase();
    let expanded_pattern = expand(pattern).to_lowercase();

    if [raw_lower, expanded_lower]
        .iter()
        .any(|h| h.contains(expanded_pattern.as_str()) || h.contains(pattern_lower.as_str()))
    {
        return true;
    }

    match mode {
        MatchMode::Command => false,
        MatchMode::Edit => {
            let suffix = pattern_lower.trim_end_matches('/');
            !suffix.is_empty() && expanded_lower.ends_with(suffix)
        }
    }
}
