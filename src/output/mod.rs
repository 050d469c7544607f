//! Output formatting and redaction.

mod redaction;
mod response;

pub use redaction::{redact_assignment, redact_secrets};
pub use response::{SplitResponse, format_error, format_response};
