//! Error types for the processing service client.

use thiserror::Error;

/// What went wrong talking to the processing service.
///
/// The three variants cover the full taxonomy the workflow cares about:
/// - [`Rejected`](GatewayError::Rejected): the service answered with a
///   non-success status, usually with a message in the body
/// - [`Unreachable`](GatewayError::Unreachable): the call itself never
///   completed (DNS, connection refused, timeout)
/// - [`Parse`](GatewayError::Parse): a 2xx answer whose body was not the
///   expected shape
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("processing service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("could not reach the processing service: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("unexpected response from the processing service: {0}")]
    Parse(String),
}

impl GatewayError {
    /// The line shown to the user when this failure ends a submission.
    ///
    /// Rejections surface the service's own message; transport and parse
    /// failures carry nothing a user can act on, so they get a generic line.
    pub fn display_message(&self) -> String {
        match self {
            GatewayError::Rejected { message, .. } if !message.trim().is_empty() => {
                message.trim().to_string()
            }
            GatewayError::Rejected { status, .. } => {
                format!("The processing service reported an error (status {status}).")
            }
            GatewayError::Unreachable(_) => {
                "Could not reach the processing service. Check that it is running and try again."
                    .to_string()
            }
            GatewayError::Parse(_) => {
                "The processing service returned an unexpected response.".to_string()
            }
        }
    }
}
