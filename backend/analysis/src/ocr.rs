//! OCR pre-step: extract text from an uploaded image via the vision model.
//!
//! The browser sends images as base64 data URLs. Whatever content type the
//! header claims, the payload is re-wrapped as a JPEG data URL before it is
//! sent upstream, matching what the vision endpoint expects.

use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::debug;

use scamlens_core::{AnalysisError, CallStage, LlmProvider, LlmRequest};

use crate::prompt;

/// Normalize a browser-supplied image value into a JPEG data URL.
///
/// Accepts either a full `data:*;base64,...` URL or a bare base64 payload.
/// The payload must decode as base64; anything else is a client error.
pub fn normalize_image_data_url(raw: &str) -> Result<String, AnalysisError> {
    let payload = match raw.split_once(',') {
        Some((_, payload)) => payload,
        None => raw,
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "image payload is empty".to_string(),
        ));
    }
    STANDARD.decode(payload).map_err(|_| {
        AnalysisError::InvalidInput("image payload is not valid base64".to_string())
    })?;
    Ok(format!("data:image/jpeg;base64,{payload}"))
}

/// Send the image to the vision model and return the extracted text.
pub async fn extract_text(
    provider: &dyn LlmProvider,
    model: &str,
    data_url: &str,
) -> Result<String, AnalysisError> {
    let request = LlmRequest {
        model: model.to_string(),
        system_prompt: prompt::OCR_SYSTEM_PROMPT.to_string(),
        user_prompt: prompt::OCR_USER_PROMPT.to_string(),
        image_data_url: Some(data_url.to_string()),
        max_tokens: prompt::OCR_MAX_TOKENS,
        temperature: 0.0,
    };

    let response = provider.complete(&request).await.map_err(|e| {
        AnalysisError::UpstreamCallFailed {
            stage: CallStage::Ocr,
            message: format!("{e:#}"),
        }
    })?;

    let extracted = response.content.trim().to_string();
    if extracted.is_empty() {
        return Err(AnalysisError::EmptyCompletion {
            stage: CallStage::Ocr,
        });
    }

    debug!(chars = extracted.chars().count(), "OCR extracted text");
    Ok(extracted)
}
