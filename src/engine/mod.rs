//! Guard engine for damage-control
//!
//! Routes a decoded [`Invocation`] to the command guard, the edit guard or
//! the output scanner, each evaluated against one [`RuleSet`] value.

pub mod bash;
pub mod edit;
pub mod paths;
pub mod secrets;

use crate::input::{HookInput, Invocation, COMMAND_TOOL, EDIT_TOOLS};
use crate::output::Decision;
use crate::rules::RuleSet;

use self::secrets::Finding;

/// Which hook is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// PreToolUse on Bash: command guard
    Bash,

    /// PreToolUse on file edits: edit guard
    Edit,

    /// PostToolUse on Bash: output secret scanner
    Output,
}

impl GuardKind {
    /// Parse a guard name as given on the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bash" | "bash-tool-guard" => Some(GuardKind::Bash),
            "edit" | "edit-tool-guard" => Some(GuardKind::Edit),
            "output" | "bash-output-validator" => Some(GuardKind::Output),
            _ => None,
        }
    }

    /// Work out the guard from the hook payload itself
    pub fn infer(input: &HookInput) -> Option<Self> {
        if input.hook_event_name.as_deref() == Some("PostToolUse") {
            return Some(GuardKind::Output);
        }
        if input.tool_name == COMMAND_TOOL {
            return Some(GuardKind::Bash);
        }
        if EDIT_TOOLS.contains(&input.tool_name.as_str()) {
            return Some(GuardKind::Edit);
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuardKind::Bash => "bash",
            GuardKind::Edit => "edit",
            GuardKind::Output => "output",
        }
    }
}

/// Result of evaluating one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A gating decision from the command or edit guard
    Decision(Decision),

    /// Findings from the output scanner (possibly none)
    Advisory(Vec<Finding>),
}

impl Outcome {
    /// The outcome for tools a guard does not handle
    pub fn pass() -> Self {
        Outcome::Decision(Decision::Allow)
    }
}

/// The guard engine. Holds the rule set for a single run.
pub struct GuardEngine {
    rules: RuleSet,
}

impl GuardEngine {
    /// Create a new engine over the given rules
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Main entry point: evaluate an invocation
    pub fn evaluate(&self, invocation: &Invocation) -> Outcome {
        match invocation {
            Invocation::Command(command) => Outcome::Decision(self.check_command(command)),
            Invocation::Edit(path) => Outcome::Decision(self.check_edit(path)),
            Invocation::OutputCapture { stdout, stderr } => {
                Outcome::Advisory(self.scan_output(stdout, stderr))
            }
            Invocation::Unsupported => Outcome::pass(),
        }
    }

    /// Decode and evaluate a hook payload for the given guard
    pub fn check(&self, input: &HookInput, guard: GuardKind) -> Outcome {
        self.evaluate(&input.invocation(guard))
    }

    /// Check a bash command
    pub fn check_command(&self, command: &str) -> Decision {
        bash::check_command(command, &self.rules)
    }

    /// Check a file edit target
    pub fn check_edit(&self, file_path: &str) -> Decision {
        edit::check_path(file_path, &self.rules)
    }

    /// Scan captured output. Rules play no part here.
    pub fn scan_output(&self, stdout: &str, stderr: &str) -> Vec<Finding> {
        secrets::scan_output(stdout, stderr)
    }

    /// Get the rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
