//! JSONL audit logging for damage-control
//!
//! Records every guard evaluation to a JSONL file for later analysis.
//! Command text is passed through the secret redactor before it is written.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::engine::secrets::redact_secrets;
use crate::engine::{GuardKind, Outcome};
use crate::input::HookInput;
use crate::output::Decision;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Asked,
    Blocked,
    /// Output scanned, nothing found
    Clean,
    /// Output scanned, credentials found
    Secrets,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the evaluation
    pub timestamp: DateTime<Utc>,

    /// Guard that ran
    pub guard: &'static str,

    pub level: LogLevel,

    /// Tool that was invoked
    pub tool: String,

    /// Redacted summary of the input
    pub input_summary: String,

    /// Reason for the decision
    pub reason: String,

    /// Names of detected credential types
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<&'static str>,

    /// Session ID (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from input and outcome
    pub fn new(guard: GuardKind, input: &HookInput, outcome: &Outcome) -> Self {
        let (level, reason, findings) = match outcome {
            Outcome::Decision(Decision::Allow) => (LogLevel::Allowed, String::new(), Vec::new()),
            Outcome::Decision(Decision::Ask { reason }) => {
                (LogLevel::Asked, reason.clone(), Vec::new())
            }
            Outcome::Decision(Decision::Block { reason }) => {
                (LogLevel::Blocked, reason.clone(), Vec::new())
            }
            Outcome::Advisory(found) if found.is_empty() => {
                (LogLevel::Clean, String::new(), Vec::new())
            }
            Outcome::Advisory(found) => (
                LogLevel::Secrets,
                format!("{} credential type(s) detected in output", found.len()),
                found.iter().map(|f| f.name).collect(),
            ),
        };

        Self {
            timestamp: Utc::now(),
            guard: guard.as_str(),
            level,
            tool: input.tool_name.clone(),
            input_summary: redact_secrets(&input.summary()),
            reason,
            findings,
            session_id: input.session_id.clone(),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` or an unopenable path disables it
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log one evaluation
    pub fn log_outcome(
        &mut self,
        guard: GuardKind,
        input: &HookInput,
        outcome: &Outcome,
    ) -> Result<(), std::io::Error> {
        let entry = AuditEntry::new(guard, input, outcome);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
