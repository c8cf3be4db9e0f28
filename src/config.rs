//! Configuration loading for damage-control
//!
//! Tool settings live in TOML with embedded defaults. The rule document
//! itself is handled by [`crate::rules::RuleSet`]; this module only decides
//! where to look for it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the rule document searched for next to the executable.
pub const PATTERNS_FILE_NAME: &str = "patterns.yaml";

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.claude/damage-control/audit.jsonl".to_string()),
        }
    }
}

/// Rule document location
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Explicit path to the rule document. When unset the default locations are searched.
    pub patterns_file: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Load configuration from the standard locations, falling back to defaults
    pub fn load() -> Self {
        let config_paths = [
            dirs::home_dir().map(|p| p.join(".claude/damage-control/config.toml")),
            Some(PathBuf::from("/etc/damage-control/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => eprintln!("Warning: Failed to load {}: {}", path.display(), e),
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand a leading `~` in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).into_owned())
    }

    /// Get the audit log path (expanded), or `None` when auditing is off
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }

    /// Candidate rule-document locations, in search order.
    ///
    /// An explicit `patterns_file` is the only candidate when set.
    pub fn patterns_candidates(&self) -> Vec<PathBuf> {
        if let Some(explicit) = self.rules.patterns_file.as_deref() {
            return vec![Self::expand_path(explicit)];
        }

        let mut candidates = Vec::new();
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join(PATTERNS_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".claude/hooks/damage-control").join(PATTERNS_FILE_NAME));
        }
        candidates
    }

    /// First existing rule document, if any
    pub fn patterns_path(&self) -> Option<PathBuf> {
        self.patterns_candidates().into_iter().find(|p| p.exists())
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.claude/damage-control/audit.jsonl"

[rules]
# patterns_file = "~/.claude/hooks/damage-control/patterns.yaml"
"#;
