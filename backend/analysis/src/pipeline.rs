//! Analysis pipeline: optional OCR pre-step, classification call, validation.
//!
//! A single inbound request triggers at most two sequential provider calls;
//! the classification call depends on the OCR output, so there is no
//! parallelism and no retry anywhere.

use std::sync::Arc;

use tracing::{debug, info};

use scamlens_core::{
    AnalysisError, AnalyzeRequest, CallStage, LlmProvider, LlmRequest, ScamVerdict, parse_verdict,
};

use crate::{ocr, prompt};

/// Orchestrates the analysis of one request end to end.
pub struct AnalysisService {
    provider: Arc<dyn LlmProvider>,
    ocr_model: String,
    classify_model: String,
}

impl AnalysisService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        ocr_model: impl Into<String>,
        classify_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            ocr_model: ocr_model.into(),
            classify_model: classify_model.into(),
        }
    }

    /// Analyze the request and return the validated verdict.
    ///
    /// An uploaded image takes precedence over request text: its extracted
    /// text becomes the content to classify.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<ScamVerdict, AnalysisError> {
        let image = request
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let content = match image {
            Some(image) => {
                let data_url = ocr::normalize_image_data_url(image)?;
                ocr::extract_text(self.provider.as_ref(), &self.ocr_model, &data_url).await?
            }
            None => request.text.as_deref().unwrap_or_default().trim().to_string(),
        };

        if content.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "neither text nor image yielded usable content".to_string(),
            ));
        }

        let llm_request = LlmRequest {
            model: self.classify_model.clone(),
            system_prompt: prompt::CLASSIFY_SYSTEM_PROMPT.to_string(),
            user_prompt: prompt::classification_prompt(&content),
            image_data_url: None,
            max_tokens: prompt::CLASSIFY_MAX_TOKENS,
            temperature: prompt::CLASSIFY_TEMPERATURE,
        };

        let response = self.provider.complete(&llm_request).await.map_err(|e| {
            AnalysisError::UpstreamCallFailed {
                stage: CallStage::Classify,
                message: format!("{e:#}"),
            }
        })?;

        let raw = response.content.trim();
        if raw.is_empty() {
            return Err(AnalysisError::EmptyCompletion {
                stage: CallStage::Classify,
            });
        }
        debug!(raw, "Classification reply");

        let verdict = parse_verdict(raw)?;
        info!(
            is_scam = verdict.is_scam,
            risk_level = ?verdict.risk_level,
            confidence = verdict.confidence,
            "Analysis complete"
        );
        Ok(verdict)
    }
}
