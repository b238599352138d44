//! Error taxonomy shared by the analysis pipeline and the HTTP layer.

use thiserror::Error;

/// Failures raised while resolving models or analysing a batch.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Requested pipeline model is outside the supported set.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Requested keyword model is outside the supported set.
    #[error("Unknown keyword model: {0}")]
    UnknownKeywordModel(String),

    /// Request body could not be interpreted.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model construction failed; the cache slot stays empty.
    #[error("Failed to load model {model}: {reason}")]
    Load { model: String, reason: String },

    #[error("Keyword extraction failed: {0}")]
    Keywords(String),

    /// Blocking analysis task panicked or was cancelled.
    #[error("Analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AnalysisError {
    /// True when the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::UnknownModel(_)
                | AnalysisError::UnknownKeywordModel(_)
                | AnalysisError::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
