//! Response formatting for command line output.

use serde::Serialize;

use crate::shell::{Report, TokenizeError};

/// JSON response for a successful split.
#[derive(Debug, Serialize)]
pub struct SplitResponse<'a> {
    pub env: &'a [String],
    pub argv: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_character: Option<usize>,
}

impl<'a> From<&'a Report> for SplitResponse<'a> {
    fn from(report: &'a Report) -> Self {
        Self {
            env: &report.command.env,
            argv: &report.command.argv,
            shell_character: report.shell_character,
        }
    }
}

/// Format a report as JSON for stdout.
pub fn format_response(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string(&SplitResponse::from(report))
}

/// Format a tokenize failure for stderr.
pub fn format_error(err: &TokenizeError) -> String {
    let mut msg = format!("REJECTED: {err}");
    if let TokenizeError::ShellCharacterFound { .. } = err {
        msg.push_str("\n\nThe command needs a real shell to run. Quote or escape the character to pass it literally.");
    }
    msg
}
