//! Error type shared by every backend call. Pages render these with
//! [`std::fmt::Display`] in alert banners, so the wording is what a handler
//! reads when a request dies. `Http` keeps the backend's `detail` string
//! verbatim; the login flow classifies 401s by that text.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timed out: {message}"),
            AppError::Parse(message) => {
                write!(formatter, "Unexpected response from the server: {message}")
            }
            AppError::Serialization(message) => {
                write!(formatter, "Could not prepare the request: {message}")
            }
            AppError::Config(message) => write!(formatter, "{message}"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn http_errors_keep_the_backend_detail() {
        let err = AppError::Http {
            status: 403,
            message: "Admin access required".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (403): Admin access required");
    }

    #[test]
    fn config_errors_read_as_written() {
        let err = AppError::Config("Choose a CSV file first.".to_string());
        assert_eq!(err.to_string(), "Choose a CSV file first.");
    }
}
