//! Error types for statement building and execution.

/// Errors that can occur while building or executing a statement.
#[derive(Debug, thiserror::Error)]
pub enum DaoError {
    /// The builder was used without the required configuration, e.g. no
    /// table was selected before a terminal call. Raised before anything
    /// is sent to the database.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The driver failed to execute a rendered statement (bad predicate
    /// text, parameter mismatch, connectivity, constraint violation).
    #[error("Execution error: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The insert succeeded but the backend did not report a generated
    /// identifier (e.g. the table has no auto-increment column).
    #[error("No generated id available for this insert")]
    IdentityUnavailable,
}

impl DaoError {
    /// Wraps a driver-level failure as an [`DaoError::Execution`].
    pub fn execution<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution(Box::new(cause))
    }
}

/// Result type alias for builder and driver operations.
pub type Result<T> = std::result::Result<T, DaoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = DaoError::execution(cause);
        assert!(matches!(err, DaoError::Execution(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_configuration_error_message() {
        let err = DaoError::Configuration(String::from("no table selected"));
        assert_eq!(err.to_string(), "Configuration error: no table selected");
    }
}
