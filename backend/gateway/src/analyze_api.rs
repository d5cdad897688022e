//! `POST /api/analyze` — the single analysis endpoint.
//!
//! Order matters: the cooldown check runs first so rate-limited requests
//! never reach the provider, then the credential check, then the pipeline.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{error, warn};

use scamlens_core::{AnalysisError, AnalyzeRequest, CallStage, ScamVerdict, VerdictError};

use crate::server::AppState;

/// Handler for `POST /api/analyze`.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ScamVerdict>, ApiError> {
    if let Err(retry_after_ms) = state.limiter.try_acquire().await {
        return Err(ApiError(AnalysisError::RateLimited { retry_after_ms }));
    }

    let Some(service) = state.analysis.clone() else {
        return Err(ApiError(AnalysisError::Misconfigured(
            "OPENAI_API_KEY is not set".to_string(),
        )));
    };

    let verdict = service.analyze(&request).await.map_err(ApiError)?;
    Ok(Json(verdict))
}

/// Converts the closed `AnalysisError` taxonomy into HTTP responses.
///
/// Body messages are Japanese because the browser client displays them
/// verbatim; the log line carries the English error detail.
#[derive(Debug)]
pub struct ApiError(pub AnalysisError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        match &error {
            AnalysisError::InvalidInput(_) | AnalysisError::RateLimited { .. } => {
                warn!(%error, "Request rejected")
            }
            _ => error!(%error, "Analysis failed"),
        }

        let (status, body) = match error {
            AnalysisError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "テキストが正しく提供されていません。" }),
            ),
            AnalysisError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": "リクエストが多すぎます。少し待ってから再試行してください。" }),
            ),
            AnalysisError::Misconfigured(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "OpenAI APIキーが設定されていません。" }),
            ),
            AnalysisError::UpstreamCallFailed {
                stage: CallStage::Ocr,
                message,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("画像の分析中にエラーが発生しました: {message}") }),
            ),
            AnalysisError::UpstreamCallFailed {
                stage: CallStage::Classify,
                message,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("OpenAI APIエラー: {message}") }),
            ),
            AnalysisError::EmptyCompletion {
                stage: CallStage::Ocr,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "画像からテキストを抽出できませんでした" }),
            ),
            AnalysisError::EmptyCompletion {
                stage: CallStage::Classify,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "分析結果が空でした" }),
            ),
            AnalysisError::Verdict(verdict_error) => verdict_error_body(verdict_error),
        };

        (status, Json(body)).into_response()
    }
}

fn verdict_error_body(error: VerdictError) -> (StatusCode, Value) {
    let body = match error {
        VerdictError::NoJson { raw } | VerdictError::MalformedJson { raw } => {
            json!({ "error": "分析結果の解析に失敗しました", "raw": raw })
        }
        VerdictError::MissingFields { fields } => {
            json!({ "error": "分析結果に必須フィールドが不足しています", "missingFields": fields })
        }
        VerdictError::MissingDetailFields { fields } => {
            json!({ "error": "分析結果に必須の詳細フィールドが不足しています", "missingDetailFields": fields })
        }
        VerdictError::MalformedResult(_) => {
            json!({ "error": "分析結果の型が不正です" })
        }
    };
    (StatusCode::INTERNAL_SERVER_ERROR, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::CooldownLimiter;
    use scamlens_analysis::{AnalysisService, MockProvider};
    use std::sync::Arc;
    use std::time::Duration;

    fn verdict_json() -> String {
        serde_json::json!({
            "isScam": false,
            "confidence": 0.05,
            "reasons": [],
            "riskLevel": "low",
            "details": {
                "urgency": { "detected": false, "examples": [] },
                "moneyRequest": { "detected": false, "examples": [] },
                "personalInfo": { "detected": false, "examples": [] },
                "unnaturalInvitation": { "detected": false, "examples": [] },
                "fearAppeal": { "detected": false, "examples": [] },
                "suspiciousUrl": { "detected": false, "examples": [] },
                "suspiciousSender": { "detected": false, "examples": [] },
                "otherRisks": { "detected": false, "examples": [] }
            }
        })
        .to_string()
    }

    fn state_with(provider: Arc<MockProvider>, cooldown: Duration) -> AppState {
        AppState {
            limiter: CooldownLimiter::new(cooldown),
            analysis: Some(Arc::new(AnalysisService::new(
                provider,
                "gpt-4o",
                "gpt-4",
            ))),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn returns_the_validated_verdict() {
        let provider = Arc::new(MockProvider::new("mock").with_response(verdict_json()));
        let state = state_with(provider, Duration::ZERO);

        let result = analyze(
            State(state),
            Json(AnalyzeRequest::from_text("明日の会議は10時からです")),
        )
        .await;

        let Json(verdict) = result.unwrap();
        assert!(!verdict.is_scam);
    }

    #[tokio::test]
    async fn second_request_inside_cooldown_gets_429_without_provider_call() {
        let provider = Arc::new(MockProvider::new("mock").with_response(verdict_json()));
        let state = state_with(provider.clone(), Duration::from_secs(1));

        let first = analyze(
            State(state.clone()),
            Json(AnalyzeRequest::from_text("テスト")),
        )
        .await;
        assert!(first.is_ok());

        let second = analyze(
            State(state),
            Json(AnalyzeRequest::from_text("テスト")),
        )
        .await;
        let response = second.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn empty_request_gets_400() {
        let provider = Arc::new(MockProvider::new("mock"));
        let state = state_with(provider.clone(), Duration::ZERO);

        let result = analyze(State(state), Json(AnalyzeRequest::default())).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn missing_credential_gets_500_before_any_outbound_call() {
        let state = AppState {
            limiter: CooldownLimiter::new(Duration::ZERO),
            analysis: None,
        };

        let result = analyze(
            State(state),
            Json(AnalyzeRequest::from_text("テスト")),
        )
        .await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unparsable_reply_echoes_raw_text() {
        let provider =
            Arc::new(MockProvider::new("mock").with_response("{ this is not json }"));
        let state = state_with(provider, Duration::ZERO);

        let result = analyze(
            State(state),
            Json(AnalyzeRequest::from_text("テスト")),
        )
        .await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["raw"].as_str().unwrap().contains("this is not json"));
    }

    #[tokio::test]
    async fn missing_fields_are_listed_in_the_body() {
        let response = ApiError(AnalysisError::Verdict(VerdictError::MissingFields {
            fields: vec!["details".to_string()],
        }))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["missingFields"][0], "details");
    }

    #[tokio::test]
    async fn missing_detail_fields_are_listed_in_the_body() {
        let response = ApiError(AnalysisError::Verdict(VerdictError::MissingDetailFields {
            fields: vec!["fearAppeal".to_string()],
        }))
        .into_response();
        let body = body_json(response).await;
        assert_eq!(body["missingDetailFields"][0], "fearAppeal");
    }
}
