use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream model error: {0}")]
    Upstream(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Errors caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlannerError::InvalidRequest(_))
    }

    /// HTTP status the error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::InvalidRequest(_) => "INVALID_REQUEST",
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Upstream(_) => "UPSTREAM_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Convert to a structured error payload.
    ///
    /// Input and configuration problems carry their own message. Everything
    /// else happened inside the model pipeline and is reported as a pipeline
    /// failure with the underlying message under `details`.
    pub fn to_error_payload(&self) -> serde_json::Value {
        match self {
            PlannerError::InvalidRequest(_) | PlannerError::Config(_) => serde_json::json!({
                "error": self.to_string(),
                "code": self.error_code(),
            }),
            _ => serde_json::json!({
                "error": "Trip planning pipeline failed",
                "details": self.to_string(),
                "code": self.error_code(),
            }),
        }
    }
}
