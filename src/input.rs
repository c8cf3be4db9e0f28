//! Input parsing for Claude Code hook JSON format
//!
//! Decoding is lenient: missing or oddly typed fields fall back to empty
//! values instead of failing, so that only syntactically broken JSON is an
//! error (and even that is treated as "allow" by the binary).

use serde::Deserialize;
use serde_json::Value;

use crate::engine::GuardKind;

/// Tool names the command guard and output scanner act on
pub const COMMAND_TOOL: &str = "Bash";

/// Tool names the edit guard acts on
pub const EDIT_TOOLS: &[&str] = &["Edit", "MultiEdit", "Write"];

/// Main input structure from Claude Code hooks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Edit")
    #[serde(default, deserialize_with = "lenient_string")]
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: ToolInput,

    /// Captured process output (PostToolUse only)
    #[serde(default, alias = "tool_response")]
    pub tool_output: Option<ToolOutput>,

    /// Optional session identifier
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub hook_event_name: Option<String>,
}

/// The fields of `tool_input` the guards care about
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    pub command: Option<String>,
    pub file_path: Option<String>,
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(String::from)
        };

        Ok(ToolInput {
            command: field("command"),
            file_path: field("file_path"),
        })
    }
}

/// Captured stdout/stderr of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl<'de> Deserialize<'de> for ToolOutput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        Ok(ToolOutput {
            stdout: stringify(value.get("stdout")),
            stderr: stringify(value.get("stderr")),
        })
    }
}

/// Strings pass through, null/absent is empty, anything else is its JSON text
fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(String::from).unwrap_or_default())
}

/// Like [`lenient_string`], but a non-string is simply absent
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(String::from))
}

/// What a guard is being asked to evaluate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Shell command about to run
    Command(String),

    /// File about to be edited
    Edit(String),

    /// Output of a command that already ran
    OutputCapture { stdout: String, stderr: String },

    /// Not a tool this guard handles, or nothing to check
    Unsupported,
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Decode the invocation a given guard should evaluate.
    ///
    /// Tools the guard does not target, and empty commands or paths, map to
    /// [`Invocation::Unsupported`].
    pub fn invocation(&self, guard: GuardKind) -> Invocation {
        match guard {
            GuardKind::Bash if self.tool_name == COMMAND_TOOL => {
                match self.tool_input.command.as_deref() {
                    Some(command) if !command.is_empty() => Invocation::Command(command.to_string()),
                    _ => Invocation::Unsupported,
                }
            }
            GuardKind::Edit if EDIT_TOOLS.contains(&self.tool_name.as_str()) => {
                match self.tool_input.file_path.as_deref() {
                    Some(path) if !path.is_empty() => Invocation::Edit(path.to_string()),
                    _ => Invocation::Unsupported,
                }
            }
            GuardKind::Output if self.tool_name == COMMAND_TOOL => {
                let output = self.tool_output.clone().unwrap_or_default();
                Invocation::OutputCapture {
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
            _ => Invocation::Unsupported,
        }
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        let detail = self
            .tool_input
            .command
            .as_deref()
            .or(self.tool_input.file_path.as_deref())
            .unwrap_or_default();

        let truncated: String = if detail.chars().count() > 100 {
            format!("{}...", detail.chars().take(100).collect::<String>())
        } else {
            detail.to_string()
        };

        if truncated.is_empty() {
            self.tool_name.clone()
        } else {
            format!("{}: {}", self.tool_name, truncated)
        }
    }
}
