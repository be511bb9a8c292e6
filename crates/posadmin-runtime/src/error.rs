use std::fmt;

/// Result type for posadmin-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or mutating a screen
#[derive(Debug)]
pub enum Error {
    /// Backend or session failure
    Api(posadmin_client::Error),

    /// Rejected input (page size, filter)
    Input(posadmin_types::Error),

    /// Invalid operation for the current screen state
    InvalidOperation(String),
}

impl Error {
    /// The underlying API error, if any
    pub fn api(&self) -> Option<&posadmin_client::Error> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api(err) => write!(f, "{}", err),
            Error::Input(err) => write!(f, "{}", err),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api(err) => Some(err),
            Error::Input(err) => Some(err),
            Error::InvalidOperation(_) => None,
        }
    }
}

impl From<posadmin_client::Error> for Error {
    fn from(err: posadmin_client::Error) -> Self {
        Error::Api(err)
    }
}

impl From<posadmin_types::Error> for Error {
    fn from(err: posadmin_types::Error) -> Self {
        Error::Input(err)
    }
}
