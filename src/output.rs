//! Output formatting for Claude Code hook responses
//!
//! Hooks talk back through the exit status plus stdout/stderr:
//!
//! | Result | Exit | Stream |
//! |--------|------|--------|
//! | Allow  | 0    | nothing |
//! | Ask    | 0    | `{"decision":"ask","reason":...}` on stdout |
//! | Block  | 2    | `BLOCKED: <reason>` on stderr |
//! | Secret findings | 0 | advisory on stderr |

use serde::Serialize;
use std::io::{self, Write};

use crate::engine::secrets::Finding;
use crate::engine::Outcome;

/// Exit status that tells Claude Code to block the tool call
pub const EXIT_BLOCK: i32 = 2;

/// Decision result from a guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the operation proceed
    Allow,

    /// Ask the user for confirmation
    Ask { reason: String },

    /// Refuse the operation
    Block { reason: String },
}

impl Decision {
    /// Create an ask decision
    pub fn ask(reason: impl Into<String>) -> Self {
        Decision::Ask {
            reason: reason.into(),
        }
    }

    /// Create a block decision
    pub fn block(reason: impl Into<String>) -> Self {
        Decision::Block {
            reason: reason.into(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_ask(&self) -> bool {
        matches!(self, Decision::Ask { .. })
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }

    /// Get the reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Ask { reason } | Decision::Block { reason } => Some(reason),
        }
    }
}

/// JSON body of an ask response
#[derive(Debug, Serialize)]
struct AskPayload<'a> {
    decision: &'static str,
    reason: &'a str,
}

/// A fully rendered hook response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookResponse {
    pub exit_code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl HookResponse {
    /// Exit 0, no output
    pub fn allow() -> Self {
        HookResponse::default()
    }

    /// Exit 0 with the ask payload on stdout
    pub fn ask(reason: &str) -> Self {
        let payload = AskPayload {
            decision: "ask",
            reason,
        };
        HookResponse {
            exit_code: 0,
            stdout: Some(serde_json::to_string(&payload).unwrap_or_else(|_| {
                r#"{"decision":"ask"}"#.to_string()
            })),
            stderr: None,
        }
    }

    /// Exit 2 with the reason on stderr
    pub fn block(reason: &str) -> Self {
        HookResponse {
            exit_code: EXIT_BLOCK,
            stdout: None,
            stderr: Some(format!("BLOCKED: {}", reason)),
        }
    }

    /// Exit 0; advisory on stderr when anything was found
    pub fn advisory(findings: &[Finding]) -> Self {
        if findings.is_empty() {
            return HookResponse::allow();
        }
        HookResponse {
            exit_code: 0,
            stdout: None,
            stderr: Some(format_advisory(findings)),
        }
    }

    /// Create a response from a Decision
    pub fn from_decision(decision: &Decision) -> Self {
        match decision {
            Decision::Allow => HookResponse::allow(),
            Decision::Ask { reason } => HookResponse::ask(reason),
            Decision::Block { reason } => HookResponse::block(reason),
        }
    }

    /// Create a response from any guard outcome
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Decision(decision) => Self::from_decision(decision),
            Outcome::Advisory(findings) => Self::advisory(findings),
        }
    }

    /// Write the streams and hand back the exit code
    pub fn emit(&self) -> i32 {
        if let Some(ref out) = self.stdout {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let _ = writeln!(handle, "{}", out);
            let _ = handle.flush();
        }
        if let Some(ref err) = self.stderr {
            let stderr = io::stderr();
            let mut handle = stderr.lock();
            let _ = writeln!(handle, "{}", err);
            let _ = handle.flush();
        }
        self.exit_code
    }
}

/// Format the secret advisory with rotation guidance
pub fn format_advisory(findings: &[Finding]) -> String {
    let rule = "=".repeat(60);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "  SECURITY ALERT: Possible credentials exposed in output!".to_string(),
        rule.clone(),
        String::new(),
        "Detected:".to_string(),
    ];

    for f in findings {
        let mut line = format!("  - {} (confidence: {})", f.name, f.confidence.as_str());
        if f.occurrences > 1 {
            line.push_str(&format!(" x{}", f.occurrences));
        }
        lines.push(line);
    }

    lines.extend(
        [
            "",
            "IMMEDIATE ACTIONS:",
            "  1. Rotate this credential immediately",
            "  2. Check if this was committed to git (git log -p | grep <key>)",
            "  3. Review who has access to this terminal/logs",
            "",
            "ROTATION LINKS:",
        ]
        .map(String::from),
    );

    for f in findings {
        lines.push(format!("  - {}: {}", f.name, f.remediation));
    }

    lines.extend(
        [
            "",
            "BEST PRACTICES:",
            "  - Store secrets in .env files (add .env to .gitignore)",
            "  - Use environment variables, not hardcoded values",
            "  - Never commit secrets to version control",
            "  - Use secret managers for production (AWS Secrets Manager, etc.)",
            "",
        ]
        .map(String::from),
    );
    lines.push(rule);
    lines.push(String::new());

    lines.join("\n")
}
