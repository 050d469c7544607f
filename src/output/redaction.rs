//! Secret redaction for logged command lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Secret patterns and their replacements.
static SECRET_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // API keys and tokens
        (
            r#"(?i)(api[_-]?key|apikey)\s*[:=]\s*['"]?([a-zA-Z0-9_\-]{20,})['"]?"#,
            "$1=<REDACTED>",
        ),
        (
            r#"(?i)(access[_-]?token|auth[_-]?token)\s*[:=]\s*['"]?([a-zA-Z0-9_\-]{20,})['"]?"#,
            "$1=<REDACTED>",
        ),
        // Bearer tokens
        (r"(?i)(bearer\s+)([a-zA-Z0-9_\-\.]{20,})", "$1<REDACTED>"),
        // AWS
        (r"AKIA[0-9A-Z]{16}", "<AWS_ACCESS_KEY_REDACTED>"),
        // GitHub
        (r"ghp_[a-zA-Z0-9]{36}", "<GITHUB_TOKEN_REDACTED>"),
        (r"github_pat_[a-zA-Z0-9_]{22,}", "<GITHUB_PAT_REDACTED>"),
        // Passwords
        (
            r#"(?i)(password|passwd|pwd)\s*[:=]\s*['"]?([^\s'"]{8,})['"]?"#,
            "$1=<REDACTED>",
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Variable names whose values are never logged.
static SECRET_NAME: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)(key|secret|token|passw(or)?d|credential|auth)").ok()
});

/// Redact secrets from text.
pub fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();
    for (re, replacement) in SECRET_PATTERNS.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Redact the value of a `NAME=VALUE` assignment when NAME looks secret.
pub fn redact_assignment(assignment: &str) -> String {
    if let Some((name, _)) = assignment.split_once('=')
        && let Some(re) = SECRET_NAME.as_ref()
        && re.is_match(name)
    {
        return format!("{name}=<REDACTED>");
    }
    redact_secrets(assignment)
}
