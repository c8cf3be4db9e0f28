//! Credential shapes for the output scanner
//!
//! Two ordered catalogs: provider-specific token shapes, and generic
//! assignment-shaped literals that only run when nothing specific matched.

/// Certainty tier of a detected credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
        }
    }
}

/// A credential shape definition
#[derive(Debug, Clone)]
pub struct SecretPattern {
    /// Display name of the credential type
    pub name: &'static str,

    /// Regex, matched case-insensitively
    pub pattern: &'static str,

    /// Where, or how, to rotate the credential
    pub remediation: &'static str,
}

impl SecretPattern {
    pub const fn new(name: &'static str, pattern: &'static str, remediation: &'static str) -> Self {
        Self {
            name,
            pattern,
            remediation,
        }
    }
}

/// Provider-specific token shapes
pub const HIGH_CONFIDENCE_PATTERNS: &[SecretPattern] = &[
    SecretPattern::new(
        "Anthropic API Key",
        r"sk-ant-[A-Za-z0-9\-_]{20,}",
        "console.anthropic.com/settings/keys",
    ),
    SecretPattern::new(
        "OpenAI API Key",
        r"sk-[A-Za-z0-9]{48,}",
        "platform.openai.com/api-keys",
    ),
    SecretPattern::new(
        "GitHub Personal Access Token",
        r"ghp_[A-Za-z0-9]{36}",
        "github.com/settings/tokens",
    ),
    SecretPattern::new(
        "GitHub OAuth Token",
        r"gho_[A-Za-z0-9]{36}",
        "github.com/settings/tokens",
    ),
    SecretPattern::new(
        "AWS Access Key ID",
        r"AKIA[A-Z0-9]{16}",
        "console.aws.amazon.com/iam",
    ),
    SecretPattern::new(
        "Private Key",
        r"-----BEGIN (RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----",
        "Generate new key pair and update all services",
    ),
    SecretPattern::new(
        "Bearer Token",
        r"Bearer\s+[A-Za-z0-9\-_\.]{20,}",
        "Rotate at the issuing service",
    ),
    SecretPattern::new(
        "Slack Token",
        r"xox[baprs]-[A-Za-z0-9\-]{10,}",
        "api.slack.com/apps",
    ),
    SecretPattern::new(
        "Square Access Token",
        r"sq0[a-z]{3}-[A-Za-z0-9\-_]{22,}",
        "developer.squareup.com/apps",
    ),
    SecretPattern::new(
        "Stripe API Key",
        r#"stripe[_-]?[a-z]*[_-]?key['"]?\s*[:=]\s*['"]?[a-zA-Z0-9_\-]{20,}"#,
        "dashboard.stripe.com/apikeys",
    ),
];

/// Assignment-shaped literals, lower confidence
pub const GENERIC_PATTERNS: &[SecretPattern] = &[
    SecretPattern::new(
        "Hardcoded Password",
        r#"['"]?password['"]?\s*[:=]\s*['"][^'"]{8,}['"]"#,
        "Change the password immediately",
    ),
    SecretPattern::new(
        "Generic API Key",
        r#"['"]?api[_-]?key['"]?\s*[:=]\s*['"][A-Za-z0-9\-_]{20,}['"]"#,
        "Identify the service and rotate the key",
    ),
];
