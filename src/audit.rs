//! Audit logging of split requests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::input::SplitRequest;
use crate::output::{redact_assignment, redact_secrets};
use crate::shell::{Report, TokenizeError};

const SUMMARY_LEN: usize = 200;

/// An audit log entry.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Profile the command was split with.
    pub profile: String,
    /// Whether the command was rejected.
    pub rejected: bool,
    /// Tokenize error (if rejected).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Reported shell metacharacter position (ContinueAndReport profiles).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_character: Option<usize>,
    /// Environment assignments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    /// The command, argv[0].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Number of arguments after the command.
    pub arg_count: usize,
    /// The input line.
    pub summary: String,
}

impl AuditEntry {
    /// Create a new audit entry from a request and its outcome.
    pub fn new(
        request: &SplitRequest,
        profile: &str,
        outcome: &Result<Report, TokenizeError>,
        redact: bool,
    ) -> Self {
        let scrub = |text: &str| {
            if redact {
                redact_secrets(text)
            } else {
                text.to_string()
            }
        };

        let mut entry = Self {
            timestamp: Utc::now(),
            profile: profile.to_string(),
            rejected: false,
            error: None,
            shell_character: None,
            env: Vec::new(),
            command: None,
            arg_count: 0,
            summary: truncate_string(&scrub(&request.command), SUMMARY_LEN),
        };

        match outcome {
            Ok(report) => {
                entry.shell_character = report.shell_character;
                entry.env = report
                    .command
                    .env
                    .iter()
                    .map(|assignment| {
                        if redact {
                            redact_assignment(assignment)
                        } else {
                            assignment.clone()
                        }
                    })
                    .collect();
                entry.command = Some(scrub(report.command.command()));
                entry.arg_count = report.command.args().len();
            }
            Err(err) => {
                entry.rejected = true;
                entry.error = Some(err.to_string());
            }
        }

        entry
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// Audit logger for writing entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }
}
