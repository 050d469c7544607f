//! Quote-aware command line tokenization.
//!
//! A single left-to-right pass over the code points of the input. No shell
//! is involved: quotes and backslashes are interpreted here and nothing is
//! expanded.

use std::mem;

use thiserror::Error;

use super::options::{Options, ShellCharacterPolicy};

/// Errors that can occur while tokenizing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unbalanced quotes")]
    UnbalancedQuotes,

    #[error("shell metacharacter found at position {position}")]
    ShellCharacterFound {
        /// Zero-based code point offset of the first metacharacter.
        position: usize,
    },
}

impl TokenizeError {
    /// Move a reported position `offset` code points to the right.
    pub(crate) fn shifted(self, offset: usize) -> Self {
        match self {
            TokenizeError::ShellCharacterFound { position } => {
                TokenizeError::ShellCharacterFound {
                    position: position + offset,
                }
            }
            other => other,
        }
    }
}

/// Result of a scan that reached the end of its input.
///
/// Under [`ShellCharacterPolicy::ContinueAndReport`] a scan can complete and
/// still carry the position of a metacharacter; both are kept here so callers
/// can decide whether best-effort tokens are good enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// Tokens in input order.
    pub tokens: Vec<String>,
    /// Position of the first shell metacharacter, if one was detected.
    pub shell_character: Option<usize>,
}

impl Scan {
    /// The deferred shell metacharacter error, if any.
    pub fn error(&self) -> Option<TokenizeError> {
        self.shell_character
            .map(|position| TokenizeError::ShellCharacterFound { position })
    }

    /// Convert into a plain result, failing on a recorded metacharacter.
    pub fn into_result(self) -> Result<Vec<String>, TokenizeError> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }
}

/// Quote mode of the scanner. Single and double quotes exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Unquoted,
    Single,
    Double,
}

/// Per-call scan state.
struct Scanner<'a> {
    options: &'a Options,
    tokens: Vec<String>,
    current: String,
    /// Set once anything (even an empty quoted section) belongs to `current`.
    has_token: bool,
    quote: Quote,
    shell_character: Option<usize>,
}

impl<'a> Scanner<'a> {
    fn new(options: &'a Options) -> Self {
        Self {
            options,
            tokens: Vec::new(),
            current: String::new(),
            has_token: false,
            quote: Quote::Unquoted,
            shell_character: None,
        }
    }

    /// Append a character to the current token. Escaped characters have lost
    /// their special meaning and are never reported as shell metacharacters.
    fn push(&mut self, c: char, pos: usize, escaped: bool) {
        if !escaped
            && self.shell_character.is_none()
            && self.options.shell_characters != ShellCharacterPolicy::Ignore
            && self.is_shell_character(c)
        {
            self.shell_character = Some(pos);
        }
        self.current.push(c);
        self.has_token = true;
    }

    fn toggle(&mut self, quote: Quote, c: char) {
        self.quote = if self.quote == quote {
            Quote::Unquoted
        } else {
            quote
        };
        self.has_token = true;
        if self.options.keep_quotes {
            self.current.push(c);
        }
    }

    fn flush(&mut self) {
        if self.has_token {
            self.tokens.push(mem::take(&mut self.current));
            self.has_token = false;
        }
    }

    fn is_shell_character(&self, c: char) -> bool {
        match self.quote {
            Quote::Single => false,
            Quote::Double => matches!(c, '$' | '`'),
            Quote::Unquoted => {
                matches!(
                    c,
                    '$' | '`'
                        | '!'
                        | '&'
                        | '*'
                        | '('
                        | ')'
                        | '~'
                        | '['
                        | ']'
                        | '|'
                        | '{'
                        | '}'
                        | ';'
                        | '<'
                        | '>'
                        | '?'
                ) || (c == '\\' && !self.options.backslash_is_literal())
            }
        }
    }
}

/// Scan a command line into tokens.
///
/// Fails with [`TokenizeError::UnbalancedQuotes`] if a quote is left open, and
/// with [`TokenizeError::ShellCharacterFound`] at the first metacharacter when
/// the policy is [`ShellCharacterPolicy::StopOnFirst`]. With
/// [`ShellCharacterPolicy::ContinueAndReport`] the metacharacter is recorded
/// in the returned [`Scan`] instead.
pub fn scan(input: &str, separators: &str, options: &Options) -> Result<Scan, TokenizeError> {
    let mut scanner = Scanner::new(options);
    let mut escaped = false;
    let mut chars = input.chars().enumerate().peekable();

    while let Some((pos, c)) = chars.next() {
        if escaped {
            escaped = false;
            scanner.push(c, pos, true);
        } else if c == '\\' && !options.ignore_backslash_escaping {
            escaped = true;
            let keep = match scanner.quote {
                _ if options.keep_backslashes => true,
                Quote::Single => true,
                // \" and \\ collapse to the escaped character
                Quote::Double => !matches!(chars.peek(), Some((_, '"' | '\\'))),
                Quote::Unquoted => false,
            };
            if keep {
                scanner.push(c, pos, false);
            }
        } else if c == '"' && scanner.quote != Quote::Single {
            scanner.toggle(Quote::Double, c);
        } else if c == '\'' && scanner.quote != Quote::Double {
            scanner.toggle(Quote::Single, c);
        } else if scanner.quote == Quote::Unquoted && separators.contains(c) {
            scanner.flush();
            if options.keep_separators {
                scanner.tokens.push(c.to_string());
            }
        } else {
            scanner.push(c, pos, false);
        }

        if options.shell_characters == ShellCharacterPolicy::StopOnFirst
            && let Some(position) = scanner.shell_character
        {
            return Err(TokenizeError::ShellCharacterFound { position });
        }
    }

    if scanner.quote != Quote::Unquoted {
        return Err(TokenizeError::UnbalancedQuotes);
    }
    scanner.flush();

    Ok(Scan {
        tokens: scanner.tokens,
        shell_character: scanner.shell_character,
    })
}

/// Tokenize a command line, failing on any detected shell metacharacter.
pub fn tokenize(
    input: &str,
    separators: &str,
    options: &Options,
) -> Result<Vec<String>, TokenizeError> {
    scan(input, separators, options)?.into_result()
}
