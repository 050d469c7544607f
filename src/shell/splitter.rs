//! Split leading environment assignments (NAME=VALUE) from the command.

/// Partition tokens into leading `NAME=VALUE` assignments and the rest.
///
/// Every token up to the first one without a `=` is an assignment. Nothing
/// beyond the presence of `=` is checked.
pub fn split_environment(mut tokens: Vec<String>) -> (Vec<String>, Vec<String>) {
    let boundary = tokens
        .iter()
        .position(|token| !token.contains('='))
        .unwrap_or(tokens.len());
    let rest = tokens.split_off(boundary);
    (tokens, rest)
}
