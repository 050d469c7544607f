//! shelltoken - split a command line into environment and argv.

use shelltoken::audit::{AuditEntry, AuditLogger};
use shelltoken::config::Config;
use shelltoken::input::SplitRequest;
use shelltoken::output::{format_error, format_response};

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut input_str = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input_str) {
        eprintln!("failed to read stdin: {}", e);
        return ExitCode::FAILURE;
    }

    let request = match SplitRequest::from_stdin(&input_str) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Request error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cwd = request.cwd.as_deref().map(Path::new);
    let compiled = match Config::load(cwd).and_then(Config::compile) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (profile_name, profile) = match compiled.profile(request.profile.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = profile.scan(&request.command);

    // Audit logging never changes the result
    if compiled.raw.audit.enabled
        && let Some(path) = &compiled.raw.audit.path
        && let Ok(mut logger) = AuditLogger::open(Path::new(path))
    {
        let entry = AuditEntry::new(&request, &profile_name, &outcome, compiled.raw.audit.redact);
        let _ = logger.log(&entry);
    }

    match &outcome {
        Ok(report) => match format_response(report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to write response: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("{}", format_error(err));
            ExitCode::from(2)
        }
    }
}
