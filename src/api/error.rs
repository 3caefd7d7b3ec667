use std::fmt;

/// Failure kinds surfaced by portal calls.
///
/// The portal answers an unauthenticated or otherwise unusable request with
/// an empty or non-JSON body instead of an error status, so
/// `InvalidResponse` and `EmptyResponse` both carry the same login hint and
/// do not attempt to tell "not logged in" apart from "unknown identifier".
#[derive(Debug, Clone)]
pub enum Error {
    /// Connection-level failure or non-2xx HTTP status, with the status
    /// kept around when one was received.
    Transport(Option<http::StatusCode>, String),
    /// Response body was not valid JSON; holds the endpoint path.
    InvalidResponse(String),
    /// Response parsed, but the value at the unwrap target was missing or
    /// empty; holds the endpoint path.
    EmptyResponse(String),
    InternalError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(Some(status), message) => {
                write!(f, "transport error ({}): {}", status, message)
            }
            Error::Transport(None, message) => write!(f, "transport error: {}", message),
            Error::InvalidResponse(endpoint) => write!(
                f,
                "invalid response received from {}, ensure you are logged in",
                endpoint
            ),
            Error::EmptyResponse(endpoint) => write!(
                f,
                "empty response received from {}, ensure you are logged in",
                endpoint
            ),
            Error::InternalError => write!(f, "internal client error"),
        }
    }
}

impl std::error::Error for Error {}
