use std::fmt;

/// Custom error type for controller audit operations
#[derive(Debug)]
pub enum AuditError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// Controller host could not be reached
    Unreachable(String),
    /// Authentication or authorization failure
    Auth(String),
    /// Failed to resolve or parse credentials
    Credentials(String),
    /// Controller response did not match the expected shape
    Malformed(String),
    /// Configuration error
    Config(String),
    /// Resource name not in the known extraction set
    UnknownResource(String),
    /// Filesystem error (results dir, report file, run log)
    Io(std::io::Error),
}

impl AuditError {
    /// Process exit code for fatal errors, one per failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            AuditError::Config(_) | AuditError::Credentials(_) => 2,
            AuditError::UnknownResource(_) => 3,
            AuditError::Unreachable(_) => 4,
            AuditError::Auth(_) => 5,
            AuditError::Api { .. } | AuditError::Http(_) => 6,
            AuditError::Io(_) => 7,
            AuditError::Malformed(_) => 8,
        }
    }
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Http(e) => write!(f, "HTTP request failed: {}", e),
            AuditError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            AuditError::Unreachable(msg) => write!(f, "Controller unreachable: {}", msg),
            AuditError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            AuditError::Credentials(msg) => write!(f, "{}", msg),
            AuditError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
            AuditError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AuditError::UnknownResource(msg) => write!(f, "Unknown resource: {}", msg),
            AuditError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::Http(e) => Some(e),
            AuditError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        AuditError::Http(err)
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Malformed(err.to_string())
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io(err)
    }
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
