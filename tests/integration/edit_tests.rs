//! Integration tests for file edit checks

use damage_control::{Decision, GuardEngine, GuardKind, HookInput, Outcome, RuleSet};

const PATTERNS: &str = r#"
zeroAccessPaths:
  - ~/.ssh/
  - "*.pem"
  - .env
  - /secrets/
readOnlyPaths:
  - /etc/
  - package-lock.json
  - /secrets/
  - ~/.bashrc
noDeletePaths:
  - /home/dev/project/
"#;

fn engine() -> GuardEngine {
    GuardEngine::new(RuleSet::from_yaml_str(PATTERNS).unwrap())
}

fn check_tool(tool: &str, file_path: &str) -> Outcome {
    let json = format!(
        r#"{{"tool_name":"{}","tool_input":{{"file_path":"{}","old_string":"a","new_string":"b"}}}}"#,
        tool,
        file_path.replace('\\', "\\\\").replace('"', "\\\"")
    );
    let input = HookInput::from_json(&json).unwrap();
    engine().check(&input, GuardKind::Edit)
}

fn check_edit(file_path: &str) -> Decision {
    match check_tool("Edit", file_path) {
        Outcome::Decision(decision) => decision,
        other => panic!("Expected a decision, got {:?}", other),
    }
}

// ============================================================================
// Zero-access paths - BLOCKED
// ============================================================================

#[test]
fn test_ssh_config_blocked() {
    assert_eq!(
        check_edit("~/.ssh/config"),
        Decision::block("Cannot edit protected file matching: ~/.ssh/")
    );
}

#[test]
fn test_ssh_config_absolute_blocked() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let path = format!("{}/.ssh/authorized_keys", home.display());
    assert!(check_edit(&path).is_block());
}

#[test]
fn test_pem_glob_blocked() {
    assert!(check_edit("/srv/tls/server.pem").is_block());
    assert!(check_edit("/srv/tls/SERVER.PEM").is_block());
}

#[test]
fn test_env_file_blocked() {
    assert_eq!(
        check_edit("/repo/.env"),
        Decision::block("Cannot edit protected file matching: .env")
    );
}

// ============================================================================
// Read-only paths - BLOCKED
// ============================================================================

#[test]
fn test_etc_blocked() {
    assert_eq!(
        check_edit("/etc/nginx/nginx.conf"),
        Decision::block("Cannot edit read-only file matching: /etc/")
    );
}

#[test]
fn test_lockfile_blocked() {
    assert!(check_edit("/repo/web/package-lock.json").is_block());
}

#[test]
fn test_home_dotfile_blocked() {
    assert!(check_edit("~/.bashrc").is_block());
}

#[test]
fn test_zero_access_reason_wins() {
    assert_eq!(
        check_edit("/secrets/token.txt"),
        Decision::block("Cannot edit protected file matching: /secrets/")
    );
}

// ============================================================================
// Allowed
// ============================================================================

#[test]
fn test_source_files_allowed() {
    assert!(check_edit("/home/dev/project/src/main.rs").is_allow());
    assert!(check_edit("README.md").is_allow());
    assert!(check_edit("Cargo.toml").is_allow());
}

#[test]
fn test_no_delete_path_editable() {
    assert!(check_edit("/home/dev/project/notes.md").is_allow());
}

// ============================================================================
// Tool routing
// ============================================================================

#[test]
fn test_write_and_multiedit_checked() {
    for tool in ["Write", "MultiEdit"] {
        assert_eq!(
            check_tool(tool, "/etc/hosts"),
            Outcome::Decision(Decision::block("Cannot edit read-only file matching: /etc/"))
        );
    }
}

#[test]
fn test_other_tools_pass() {
    assert_eq!(check_tool("Read", "/etc/hosts"), Outcome::pass());
    assert_eq!(check_tool("Bash", "/etc/hosts"), Outcome::pass());
}

#[test]
fn test_missing_file_path_passes() {
    let input = HookInput::from_json(r#"{"tool_name":"Edit","tool_input":{}}"#).unwrap();
    assert_eq!(engine().check(&input, GuardKind::Edit), Outcome::pass());
}
