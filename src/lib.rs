//! damage-control - Claude Code hooks that stop an agent from damaging its environment
//!
//! This library evaluates tool invocations against a declarative rule set
//! before they run, and scans command output for leaked credentials after
//! they run.
//!
//! # Features
//!
//! - **Command guard**: ordered regex rules (ask or block), then protected-path checks
//! - **Edit guard**: zero-access and read-only paths for file edits
//! - **Output scanner**: provider-specific and generic credential shapes, advisory only
//! - **Fail-open**: a missing or broken rule document allows everything
//! - **Audit logging**: JSONL log of all evaluations
//!
//! # Example
//!
//! ```
//! use damage_control::{GuardEngine, GuardKind, HookInput, RuleSet};
//!
//! let rules = RuleSet::from_yaml_str("noDeletePaths:\n  - /etc/passwd\n").unwrap();
//! let engine = GuardEngine::new(rules);
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"rm /etc/passwd"}}"#;
//! let hook_input = HookInput::from_json(input).unwrap();
//!
//! let decision = engine.check_command("rm /etc/passwd");
//! assert!(decision.is_block());
//! # let _ = engine.check(&hook_input, GuardKind::Bash);
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use engine::secrets::{Finding, SecretScanner};
pub use engine::{GuardEngine, GuardKind, Outcome};
pub use error::{Error, Result};
pub use input::{HookInput, Invocation};
pub use output::{Decision, HookResponse};
pub use rules::secrets::Confidence;
pub use rules::{CommandPattern, RuleSet};
