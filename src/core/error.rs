//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A hook in one of the pipeline chains reported a failure
    #[error("{phase} hook failed: {message}")]
    Hook { phase: String, message: String },

    /// JSON encoding of an argument failed
    #[error("JSON encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A level name or number could not be parsed
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The caller broke a formatting contract (e.g. a non-string field key)
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a hook error for the given pipeline phase
    pub fn hook(phase: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Hook {
            phase: phase.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a contract violation error
    pub fn contract<S: Into<String>>(msg: S) -> Self {
        LoggerError::ContractViolation(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
