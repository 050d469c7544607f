//! shelltoken - split command lines without a shell.
//!
//! Splits a command line into leading `NAME=VALUE` environment assignments
//! and an argv vector, honoring single quotes, double quotes and backslash
//! escapes the way `/bin/sh` (or Windows) would. Nothing is executed or
//! expanded; constructs only a real shell could interpret (pipes,
//! substitutions, redirections, globs) can be rejected instead.
//!
//! ```
//! let line = shelltoken::split_linux("PATH=/bin ls -l").unwrap();
//! assert_eq!(line.env, vec!["PATH=/bin"]);
//! assert_eq!(line.argv, vec!["ls", "-l"]);
//! ```

pub mod audit;
pub mod config;
pub mod input;
pub mod output;
pub mod shell;

pub use config::{CompiledConfig, Config};
pub use input::SplitRequest;
pub use shell::{
    CommandLine, Options, Profile, Report, Scan, ShellCharacterPolicy, TokenizeError, WHITESPACE,
    scan, split_environment, split_linux, split_windows, tokenize,
};
