use std::fmt;

use thiserror::Error;

use crate::verdict::VerdictError;

/// Which of the two outbound provider calls a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStage {
    /// The multimodal text-extraction call for uploaded images.
    Ocr,
    /// The scam-classification call.
    Classify,
}

impl fmt::Display for CallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallStage::Ocr => write!(f, "image text extraction"),
            CallStage::Classify => write!(f, "scam classification"),
        }
    }
}

/// Top-level error type for a single analysis request.
///
/// Every variant maps to exactly one HTTP status at the gateway boundary;
/// none of them crash the process and none are retried.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Neither text nor image yielded usable content.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Request arrived inside the global cooldown window.
    #[error("rate limited, retry in {retry_after_ms} ms")]
    RateLimited { retry_after_ms: u64 },

    /// The provider credential is missing or unusable.
    #[error("configuration error: {0}")]
    Misconfigured(String),

    /// The completion provider call itself failed (network, auth,
    /// provider-side error, timeout).
    #[error("{stage} call failed: {message}")]
    UpstreamCallFailed { stage: CallStage, message: String },

    /// The provider answered but returned no text.
    #[error("{stage} returned no content")]
    EmptyCompletion { stage: CallStage },

    /// The provider's reply could not be validated as a verdict.
    #[error(transparent)]
    Verdict(#[from] VerdictError),
}
