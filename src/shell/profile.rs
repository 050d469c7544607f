//! Named tokenizer configurations.

use super::options::{Options, WHITESPACE};
use super::splitter::split_environment;
use super::tokenizer::{self, TokenizeError};

/// A command line split into environment assignments and argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Leading `NAME=VALUE` assignments.
    pub env: Vec<String>,
    /// Command and arguments. Never empty; `[""]` means no command.
    pub argv: Vec<String>,
}

impl CommandLine {
    /// The command (argv[0]).
    pub fn command(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }

    /// Arguments after the command.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }
}

/// A split that ran to completion, possibly with a reported metacharacter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub command: CommandLine,
    /// Position of the first shell metacharacter in the caller's input.
    pub shell_character: Option<usize>,
}

impl Report {
    pub fn error(&self) -> Option<TokenizeError> {
        self.shell_character
            .map(|position| TokenizeError::ShellCharacterFound { position })
    }

    pub fn into_result(self) -> Result<CommandLine, TokenizeError> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self.command),
        }
    }
}

/// Separator set and options applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    separators: String,
    options: Options,
    trim: bool,
}

impl Profile {
    /// A custom profile. Input is not trimmed.
    pub fn new(separators: impl Into<String>, options: Options) -> Self {
        Self {
            separators: separators.into(),
            options,
            trim: false,
        }
    }

    /// Split like `/bin/sh` would, rejecting shell metacharacters.
    pub fn linux() -> Self {
        Self::new(WHITESPACE, Options::linux()).trimmed(true)
    }

    /// Split like Windows would: backslashes are kept verbatim.
    pub fn windows() -> Self {
        Self::new(WHITESPACE, Options::windows()).trimmed(true)
    }

    /// Look up a built-in profile by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linux" => Some(Self::linux()),
            "windows" => Some(Self::windows()),
            _ => None,
        }
    }

    /// Trim leading and trailing whitespace before tokenizing.
    pub fn trimmed(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn separators(&self) -> &str {
        &self.separators
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Split `input`, failing on any shell metacharacter the options detect.
    pub fn split(&self, input: &str) -> Result<CommandLine, TokenizeError> {
        self.scan(input)?.into_result()
    }

    /// Split `input`, keeping a metacharacter found under
    /// `ContinueAndReport` in the report instead of failing.
    pub fn scan(&self, input: &str) -> Result<Report, TokenizeError> {
        let (input, offset) = if self.trim {
            let start = input.trim_start();
            let offset = input[..input.len() - start.len()].chars().count();
            (start.trim_end(), offset)
        } else {
            (input, 0)
        };

        let scan = tokenizer::scan(input, &self.separators, &self.options)
            .map_err(|e| e.shifted(offset))?;
        let (env, mut argv) = split_environment(scan.tokens);
        if argv.is_empty() {
            argv.push(String::new());
        }

        Ok(Report {
            command: CommandLine { env, argv },
            shell_character: scan.shell_character.map(|pos| pos + offset),
        })
    }
}

/// Split a command line the way `/bin/sh` would.
pub fn split_linux(input: &str) -> Result<CommandLine, TokenizeError> {
    Profile::linux().split(input)
}

/// Split a command line the way Windows would.
pub fn split_windows(input: &str) -> Result<CommandLine, TokenizeError> {
    Profile::windows().split(input)
}
