use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("AWS error: {0}")]
    Aws(String),

    #[error("user creation failed: {0}")]
    CreationFailed(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

/// Build a [`DirectoryError::Aws`] for a failed Identity Store call.
pub(crate) fn api_error(action: &str, err: &dyn std::error::Error) -> DirectoryError {
    DirectoryError::Aws(format!("identitystore:{action} failed: {}", format_err_chain(err)))
}
