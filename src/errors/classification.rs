use super::types::DashboardError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl DashboardError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            DashboardError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            DashboardError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },

            // Non-retryable errors
            DashboardError::Config(_) => ErrorClassification {
                error_type: "ConfigurationError",
                retryable: false,
            },
            DashboardError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                retryable: false,
            },
            DashboardError::Import(_) | DashboardError::InvalidRecord(_) => ErrorClassification {
                error_type: "ValidationError",
                retryable: false,
            },
            DashboardError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            DashboardError::Json(_) | DashboardError::Yaml(_) => ErrorClassification {
                error_type: "ParseError",
                retryable: false,
            },
            DashboardError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_retryable() {
        assert!(DashboardError::Network("connection refused".into()).classify().retryable);
        assert!(DashboardError::Timeout("504 Gateway Timeout".into()).classify().retryable);
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let class = DashboardError::Import("No data to insert".into()).classify();
        assert_eq!(class.error_type, "ValidationError");
        assert!(!class.retryable);

        let class = DashboardError::InvalidRecord("missing stage".into()).classify();
        assert_eq!(class.error_type, "ValidationError");
        assert!(!class.retryable);
    }

    #[test]
    fn test_database_error_not_retryable() {
        let class = DashboardError::Database("locked".into()).classify();
        assert_eq!(class.error_type, "DatabaseError");
        assert!(!class.retryable);
    }
}
