use thiserror::Error;

use crate::stage::Stage;

/// Errors raised by the thought lifecycle engine
#[derive(Error, Debug)]
pub enum ReasoningError {
    #[error("Invalid thinking stage: '{value}'. Valid stages are: {valid}")]
    InvalidStage { value: String, valid: String },

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReasoningError {
    pub fn invalid_stage(value: &str) -> Self {
        Self::InvalidStage {
            value: value.to_string(),
            valid: Stage::valid_labels(),
        }
    }

    pub fn thought_not_found(number: i32) -> Self {
        Self::NotFound(format!("Thought with ID {} not found", number))
    }

    pub fn parent_not_found(number: i32) -> Self {
        Self::NotFound(format!("Parent thought with ID {} not found", number))
    }

    /// Name reported as `error_kind` in failure envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidStage { .. } => "InvalidStage",
            Self::Validation { .. } => "ValidationError",
            Self::NotFound(_) => "NotFound",
            Self::Config(_) => "ConfigError",
            Self::Serialization(_) => "SerializationError",
        }
    }
}

/// Convert ValidationError to ReasoningError
impl From<crate::validation::ValidationError> for ReasoningError {
    fn from(err: crate::validation::ValidationError) -> Self {
        use crate::validation::ValidationError;

        ReasoningError::Validation {
            field: match &err {
                ValidationError::InvalidThoughtNumber { .. } => "thought_number".to_string(),
                ValidationError::TotalBelowNumber { .. } => "total_thoughts".to_string(),
                ValidationError::ScoreOutOfRange { .. } => "score".to_string(),
                ValidationError::RevisionNotEarlier { .. } => "revises_thought".to_string(),
            },
            reason: err.to_string(),
        }
    }
}

/// Convert ReasoningError to MCP-compatible ErrorData
impl From<ReasoningError> for rmcp::model::ErrorData {
    fn from(err: ReasoningError) -> Self {
        match err {
            ReasoningError::InvalidStage { .. } | ReasoningError::Validation { .. } => {
                rmcp::model::ErrorData::invalid_params(err.to_string(), None)
            }
            ReasoningError::NotFound(_) => {
                rmcp::model::ErrorData::invalid_request(err.to_string(), None)
            }
            _ => rmcp::model::ErrorData::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias for convenience
pub type ReasoningResult<T> = std::result::Result<T, ReasoningError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::{ErrorCode, ErrorData};

    #[test]
    fn test_kinds_name_each_variant() {
        assert_eq!(ReasoningError::invalid_stage("Brainstorm").kind(), "InvalidStage");
        assert_eq!(ReasoningError::parent_not_found(3).kind(), "NotFound");

        let encoding = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ReasoningError::from(encoding).kind(), "SerializationError");
    }

    #[test]
    fn test_error_data_codes() {
        let data = ErrorData::from(ReasoningError::invalid_stage("Brainstorm"));
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);

        let data = ErrorData::from(ReasoningError::thought_not_found(7));
        assert_eq!(data.code, ErrorCode::INVALID_REQUEST);
        assert_eq!(data.message, "Thought with ID 7 not found");

        let encoding = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let data = ErrorData::from(ReasoningError::from(encoding));
        assert_eq!(data.code, ErrorCode::INTERNAL_ERROR);
        assert!(data.message.starts_with("Serialization error"));
    }
}
