use serde::Deserialize;
use std::fmt;

use crate::tsv::TsvErrorReport;

/// Result type for posadmin-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// One server-side validation failure tied to a form field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Structured validation failure: a summary plus per-field messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub message: String,
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    /// Message attached to a single form field, if any
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == name)
            .map(|f| f.message.as_str())
    }
}

/// Error types that can occur while talking to the backend
#[derive(Debug)]
pub enum Error {
    /// The backend could not be reached at all
    Network { url: String, message: String },

    /// 401: credentials missing or rejected; the cached session has been cleared
    Unauthorized,

    /// 403: authenticated but not allowed; the session is kept
    Forbidden(String),

    /// 400/422 with field-level errors
    Validation(ValidationErrors),

    /// Any other non-success status, message surfaced as sent
    Server { status: u16, message: String },

    /// Response body did not have the expected shape
    Decode(String),

    /// 400 on a TSV import; carries the error report returned by the server
    TsvRejected(TsvErrorReport),

    /// A credential check was requested while another one is running
    AuthInProgress,

    /// Configuration error
    Config(String),

    /// Invalid user input
    Input(posadmin_types::Error),

    /// IO operation failed
    Io(std::io::Error),
}

impl Error {
    /// Map a non-success response onto the error taxonomy.
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_slice(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone().or_else(|| b.error.clone()))
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    format!("request failed with status {}", status)
                } else {
                    text
                }
            });

        match status {
            401 => Error::Unauthorized,
            403 => Error::Forbidden(message),
            400 | 422 => match parsed {
                Some(ErrorBody { errors, .. }) if !errors.is_empty() => {
                    Error::Validation(ValidationErrors {
                        message,
                        fields: errors,
                    })
                }
                _ => Error::Server { status, message },
            },
            _ => Error::Server { status, message },
        }
    }

    /// True for failures that mean the user must log in again
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network { url, message } => {
                write!(f, "Backend unreachable at {} ({})", url, message)
            }
            Error::Unauthorized => write!(f, "Session expired or invalid; please log in again"),
            Error::Forbidden(msg) => write!(f, "Permission denied: {}", msg),
            Error::Validation(errors) => {
                write!(f, "{}", errors.message)?;
                for field in &errors.fields {
                    write!(f, "\n  {}: {}", field.field, field.message)?;
                }
                Ok(())
            }
            Error::Server { status, message } => write!(f, "Server error ({}): {}", status, message),
            Error::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            Error::TsvRejected(report) => write!(
                f,
                "Upload rejected: {} invalid row(s)",
                report.rows().len()
            ),
            Error::AuthInProgress => write!(f, "A login check is already in progress"),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Input(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Input(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<posadmin_types::Error> for Error {
    fn from(err: posadmin_types::Error) -> Self {
        Error::Input(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_mapped_per_field() {
        let body = br#"{"message":"Invalid product","errors":[{"field":"mrp","message":"must be positive"}]}"#;
        let Error::Validation(errors) = Error::from_status(400, body) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.message, "Invalid product");
        assert_eq!(errors.field("mrp"), Some("must be positive"));
        assert_eq!(errors.field("name"), None);
    }

    #[test]
    fn test_plain_400_is_a_server_error() {
        let err = Error::from_status(400, br#"{"message":"Barcode already exists"}"#);
        assert!(matches!(err, Error::Server { status: 400, ref message } if message == "Barcode already exists"));
    }

    #[test]
    fn test_forbidden_keeps_message() {
        let err = Error::from_status(403, br#"{"error":"Supervisor role required"}"#);
        assert_eq!(err.to_string(), "Permission denied: Supervisor role required");
    }

    #[test]
    fn test_text_body_used_as_message() {
        let err = Error::from_status(500, b"boom");
        assert_eq!(err.to_string(), "Server error (500): boom");

        let err = Error::from_status(502, b"");
        assert_eq!(err.to_string(), "Server error (502): request failed with status 502");
    }
}
