use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl AppError {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn export<S: Into<String>>(msg: S) -> Self {
        Self::Export(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn operation_failed<S: Into<String>>(msg: S) -> Self {
        Self::OperationFailed(msg.into())
    }

    /// Whether the message can be shown to the organizer verbatim.
    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Database(_) | Self::Serialization(_) | Self::Io(_) | Self::Anyhow(_) => false,
            Self::InvalidInput(_)
            | Self::NotFound(_)
            | Self::Config(_)
            | Self::Export(_)
            | Self::Unsupported(_)
            | Self::OperationFailed(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Database(_) => "Database operation failed".to_string(),
                Self::Serialization(_) => "Could not read stored data".to_string(),
                Self::Io(_) => "File operation failed".to_string(),
                Self::Anyhow(_) => "Operation failed".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_string_hides_internal_errors() {
        let err = AppError::Anyhow(anyhow::anyhow!("table sessions has no column named foo"));
        assert!(!err.is_pii_safe());
        assert_eq!(err.to_safe_string(), "Operation failed");
    }

    #[test]
    fn test_safe_string_keeps_user_errors() {
        let err = AppError::invalid_input("No sessions selected");
        assert!(err.is_pii_safe());
        assert_eq!(err.to_safe_string(), "Invalid input: No sessions selected");
    }
}
