//! Rule store for damage-control
//!
//! A [`RuleSet`] is the immutable, per-invocation view of the rule document:
//! ordered command patterns plus three classes of protected paths. It is
//! loaded once and then passed by reference into every guard.

pub mod secrets;

use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};

/// Reason used when a command pattern omits one.
pub const DEFAULT_REASON: &str = "Matched blocked pattern";

/// A single `bashToolPatterns` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandPattern {
    /// Regex matched case-insensitively against the raw command
    #[serde(default)]
    pub pattern: String,

    /// Human-readable reason reported on a hit
    #[serde(default = "default_reason")]
    pub reason: String,

    /// Ask for confirmation instead of blocking
    #[serde(default)]
    pub ask: bool,
}

impl CommandPattern {
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>, ask: bool) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
            ask,
        }
    }
}

fn default_reason() -> String {
    DEFAULT_REASON.to_string()
}

/// The loaded rule document. Order within each collection is evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSet {
    #[serde(deserialize_with = "nullable")]
    bash_tool_patterns: Vec<CommandPattern>,

    #[serde(deserialize_with = "nullable_strings")]
    zero_access_paths: Vec<String>,

    #[serde(deserialize_with = "nullable_strings")]
    read_only_paths: Vec<String>,

    #[serde(deserialize_with = "nullable_strings")]
    no_delete_paths: Vec<String>,
}

/// `key:` with no value in YAML arrives as null; treat it as empty.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Path lists keep only scalar entries; numbers are stringified, anything else dropped.
fn nullable_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = nullable(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect())
}

impl RuleSet {
    pub fn new(
        bash_tool_patterns: Vec<CommandPattern>,
        zero_access_paths: Vec<String>,
        read_only_paths: Vec<String>,
        no_delete_paths: Vec<String>,
    ) -> Self {
        Self {
            bash_tool_patterns,
            zero_access_paths,
            read_only_paths,
            no_delete_paths,
        }
    }

    /// Load the rule document the configuration points at.
    ///
    /// Never fails: a missing document yields an empty set, and a malformed
    /// one yields an empty set plus a warning on stderr. Both leave every
    /// guard permissive.
    pub fn load(config: &Config) -> Self {
        let Some(path) = config.patterns_path() else {
            return RuleSet::default();
        };

        match Self::load_from(&path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Warning: Failed to load rules from {}: {}", path.display(), e);
                RuleSet::default()
            }
        }
    }

    /// Load from a specific path, picking the decoder by extension
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let blank = content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if blank {
            return Ok(RuleSet::default());
        }
        // `~` or `null` documents decode to None
        let rules: Option<RuleSet> = serde_yaml::from_str(content)?;
        Ok(rules.unwrap_or_default())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(RuleSet::default());
        }
        let rules: Option<RuleSet> = serde_json::from_str(content)?;
        Ok(rules.unwrap_or_default())
    }

    pub fn bash_tool_patterns(&self) -> &[CommandPattern] {
        &self.bash_tool_patterns
    }

    pub fn zero_access_paths(&self) -> &[String] {
        &self.zero_access_paths
    }

    pub fn read_only_paths(&self) -> &[String] {
        &self.read_only_paths
    }

    pub fn no_delete_paths(&self) -> &[String] {
        &self.no_delete_paths
    }

    /// True when no collection holds any entry
    pub fn is_empty(&self) -> bool {
        self.bash_tool_patterns.is_empty()
            && self.zero_access_paths.is_empty()
            && self.read_only_paths.is_empty()
            && self.no_delete_paths.is_empty()
    }
}
