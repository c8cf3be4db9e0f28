//! Secret scanning for captured command output
//!
//! The scanner is advisory only. It reports what it finds and never changes
//! the decision for the command that produced the output.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::rules::secrets::{Confidence, SecretPattern, GENERIC_PATTERNS, HIGH_CONFIDENCE_PATTERNS};

/// A detected credential-shaped string
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Finding {
    pub name: &'static str,
    pub confidence: Confidence,
    pub remediation: &'static str,
    /// How many times the shape appeared in the scanned text
    pub occurrences: usize,
}

struct CompiledSecret {
    def: &'static SecretPattern,
    regex: Regex,
}

/// Compile a catalog, dropping entries whose pattern does not compile
fn compile(catalog: &'static [SecretPattern]) -> Vec<CompiledSecret> {
    catalog
        .iter()
        .filter_map(|def| {
            RegexBuilder::new(def.pattern)
                .case_insensitive(true)
                .build()
                .ok()
                .map(|regex| CompiledSecret { def, regex })
        })
        .collect()
}

static DEFAULT_SCANNER: Lazy<SecretScanner> =
    Lazy::new(|| SecretScanner::with_catalogs(HIGH_CONFIDENCE_PATTERNS, GENERIC_PATTERNS));

/// Two-tier credential scanner
pub struct SecretScanner {
    high: Vec<CompiledSecret>,
    generic: Vec<CompiledSecret>,
}

impl SecretScanner {
    /// The built-in catalogs, compiled once per process
    pub fn builtin() -> &'static SecretScanner {
        &DEFAULT_SCANNER
    }

    pub fn with_catalogs(
        high: &'static [SecretPattern],
        generic: &'static [SecretPattern],
    ) -> Self {
        Self {
            high: compile(high),
            generic: compile(generic),
        }
    }

    /// Scan stdout and stderr of one command
    pub fn scan_output(&self, stdout: &str, stderr: &str) -> Vec<Finding> {
        let content = format!("{}\n{}", stdout, stderr);
        if content.trim().is_empty() {
            return Vec::new();
        }
        self.scan(&content)
    }

    /// Scan arbitrary text. Generic shapes only run when no specific shape matched.
    pub fn scan(&self, text: &str) -> Vec<Finding> {
        let findings = collect(&self.high, text, Confidence::High);
        if !findings.is_empty() {
            return findings;
        }
        collect(&self.generic, text, Confidence::Medium)
    }

    /// Replace every credential-shaped substring with `[REDACTED]`
    pub fn redact(&self, text: &str) -> String {
        let mut redacted = text.to_string();
        for secret in self.high.iter().chain(&self.generic) {
            redacted = secret.regex.replace_all(&redacted, "[REDACTED]").into_owned();
        }
        redacted
    }
}

fn collect(catalog: &[CompiledSecret], text: &str, confidence: Confidence) -> Vec<Finding> {
    catalog
        .iter()
        .filter_map(|secret| {
            let occurrences = secret.regex.find_iter(text).count();
            (occurrences > 0).then(|| Finding {
                name: secret.def.name,
                confidence,
                remediation: secret.def.remediation,
                occurrences,
            })
        })
        .collect()
}

/// Scan captured output with the built-in catalogs
pub fn scan_output(stdout: &str, stderr: &str) -> Vec<Finding> {
    SecretScanner::builtin().scan_output(stdout, stderr)
}

/// Redact secrets in text for logging
pub fn redact_secrets(text: &str) -> String {
    SecretScanner::builtin().redact(text)
}
