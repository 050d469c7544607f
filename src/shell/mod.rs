//! Command line tokenization.

mod options;
mod profile;
mod splitter;
mod tokenizer;

pub use options::{Options, ShellCharacterPolicy, WHITESPACE};
pub use profile::{CommandLine, Profile, Report, split_linux, split_windows};
pub use splitter::split_environment;
pub use tokenizer::{Scan, TokenizeError, scan, tokenize};
