//! damage-control - Claude Code hooks that stop an agent from damaging its environment
//!
//! # Usage
//!
//! ```bash
//! # PreToolUse on Bash
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm /etc/passwd"}}' | damage-control bash
//!
//! # PreToolUse on Edit/Write
//! echo '{"tool_name":"Edit","tool_input":{"file_path":"~/.ssh/config"}}' | damage-control edit
//!
//! # PostToolUse on Bash
//! damage-control output < payload.json
//! ```

use std::env;
use std::io::{self, Read};
use std::path::Path;
use std::process;

use damage_control::{
    audit::AuditLogger,
    config::Config,
    engine::{GuardEngine, GuardKind, Outcome},
    input::{HookInput, Invocation},
    output::HookResponse,
    rules::RuleSet,
};

/// Print version information
fn print_version() {
    println!("damage-control {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"damage-control - Claude Code hooks that stop an agent from damaging its environment

USAGE:
    damage-control [GUARD] [OPTIONS]

GUARDS:
    bash      Check a Bash command before it runs (alias: bash-tool-guard)
    edit      Check an Edit/MultiEdit/Write target (alias: edit-tool-guard)
    output    Scan Bash output for credentials (alias: bash-output-validator)
    (omitted) Inferred from hook_event_name and tool_name

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file
    -p, --patterns PATH     Path to rule document (patterns.yaml)

EXIT STATUS:
    0  allow (an ask decision is printed as JSON on stdout)
    2  block (reason on stderr)

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [
          {{ "matcher": "Bash", "hooks": [{{ "type": "command", "command": "damage-control bash" }}] }},
          {{ "matcher": "Edit|MultiEdit|Write", "hooks": [{{ "type": "command", "command": "damage-control edit" }}] }}
        ],
        "PostToolUse": [
          {{ "matcher": "Bash", "hooks": [{{ "type": "command", "command": "damage-control output" }}] }}
        ]
      }}
    }}
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    guard: Option<GuardKind>,
    config_path: Option<String>,
    patterns_path: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            guard: None,
            config_path: None,
            patterns_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "-p" | "--patterns" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.patterns_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    result.config_path = Some(arg.trim_start_matches("--config=").to_string());
                }
                arg if arg.starts_with("--patterns=") => {
                    result.patterns_path = Some(arg.trim_start_matches("--patterns=").to_string());
                }
                arg => {
                    if let Some(guard) = GuardKind::from_str(arg) {
                        result.guard = Some(guard);
                    }
                }
            }
            i += 1;
        }

        result
    }
}

fn main() {
    let args = Args::parse();

    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    let mut config = if let Some(ref path) = args.config_path {
        Config::load_from(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path, e);
            Config::default()
        })
    } else {
        Config::load()
    };

    if let Some(path) = args.patterns_path {
        config.rules.patterns_file = Some(path);
    }

    process::exit(run(&config, args.guard));
}

/// Evaluate one hook payload from stdin and return the exit status.
///
/// Unreadable or undecodable input allows the call silently.
fn run(config: &Config, guard: Option<GuardKind>) -> i32 {
    let mut input_json = String::new();
    if io::stdin().read_to_string(&mut input_json).is_err() || input_json.trim().is_empty() {
        return 0;
    }

    let Ok(input) = HookInput::from_json(&input_json) else {
        return 0;
    };

    let Some(guard) = guard.or_else(|| GuardKind::infer(&input)) else {
        return 0;
    };

    let invocation = input.invocation(guard);
    if invocation == Invocation::Unsupported {
        return 0;
    }

    // The scanner does not consult the rule document
    let rules = match guard {
        GuardKind::Output => RuleSet::default(),
        GuardKind::Bash | GuardKind::Edit => RuleSet::load(config),
    };
    let engine = GuardEngine::new(rules);
    let outcome: Outcome = engine.evaluate(&invocation);

    let mut logger = AuditLogger::new(config.audit_path().as_deref());
    if let Err(e) = logger.log_outcome(guard, &input, &outcome) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }

    HookResponse::from_outcome(&outcome).emit()
}
