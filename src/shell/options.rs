//! Tokenizer options.

use serde::Deserialize;

/// Default separator set: space, tab, newline, carriage return.
pub const WHITESPACE: &str = " \t\n\r";

/// What the tokenizer does when it meets a shell metacharacter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellCharacterPolicy {
    /// Do not look for shell metacharacters at all.
    #[default]
    Ignore,
    /// Abort the scan at the first metacharacter.
    StopOnFirst,
    /// Finish the scan, then report the first metacharacter.
    ContinueAndReport,
}

/// Tokenizer policy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Keep backslashes in the output instead of only using them as escapes.
    pub keep_backslashes: bool,
    /// Treat backslash as an ordinary character.
    pub ignore_backslash_escaping: bool,
    /// Keep the quote characters that open and close quoted sections.
    pub keep_quotes: bool,
    /// Emit each separator as a token of its own.
    pub keep_separators: bool,
    /// Shell metacharacter handling.
    pub shell_characters: ShellCharacterPolicy,
}

impl Options {
    /// Options approximating `/bin/sh` quoting.
    pub const fn linux() -> Self {
        Self {
            keep_backslashes: false,
            ignore_backslash_escaping: false,
            keep_quotes: false,
            keep_separators: false,
            shell_characters: ShellCharacterPolicy::StopOnFirst,
        }
    }

    /// Options approximating `cmd.exe` quoting: backslashes are path
    /// characters, never escapes.
    pub const fn windows() -> Self {
        Self {
            keep_backslashes: true,
            ignore_backslash_escaping: true,
            keep_quotes: false,
            keep_separators: false,
            shell_characters: ShellCharacterPolicy::StopOnFirst,
        }
    }

    /// Whether a backslash handed to the token is a literal character.
    pub(crate) fn backslash_is_literal(&self) -> bool {
        self.keep_backslashes || self.ignore_backslash_escaping
    }
}
