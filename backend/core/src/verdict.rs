//! Verdict extraction and validation.
//!
//! The classification model is asked for pure JSON but routinely wraps the
//! object in prose or code fences. This module is the single place that
//! slices the outermost braces out of a reply, parses it, and checks the
//! result against the `ScamVerdict` contract. Every failure is terminal for
//! the request; nothing here retries.

use serde_json::Value;
use thiserror::Error;

use crate::types::{ScamVerdict, REQUIRED_DETAIL_FIELDS, REQUIRED_FIELDS};

/// Closed set of validation failures for a model reply.
#[derive(Debug, Error)]
pub enum VerdictError {
    /// The reply contains no `{...}` object at all.
    #[error("no JSON object found in model reply")]
    NoJson { raw: String },

    /// The sliced object is not parseable JSON.
    #[error("model reply could not be parsed as JSON")]
    MalformedJson { raw: String },

    /// One or more of the five required top-level keys is absent.
    #[error("analysis result is missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// One or more of the eight required category keys is absent.
    #[error("analysis result is missing required detail fields: {}", .fields.join(", "))]
    MissingDetailFields { fields: Vec<String> },

    /// A field is present but has the wrong type or enum value.
    #[error("analysis result is malformed: {0}")]
    MalformedResult(String),
}

/// Extract and validate a `ScamVerdict` from a raw model reply.
///
/// Slices the substring between the first `{` and the last `}` before
/// parsing, so surrounding prose and code fences are ignored. The checks run
/// in contract order: presence of top-level keys, presence of category keys,
/// then type/enum conformance. Validation is idempotent: re-serializing the
/// returned verdict and parsing it again yields an equal verdict.
pub fn parse_verdict(raw: &str) -> Result<ScamVerdict, VerdictError> {
    let trimmed = raw.trim();

    let start = trimmed.find('{');
    let end = trimmed.rfind('}');
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => {
            return Err(VerdictError::NoJson {
                raw: raw.to_string(),
            })
        }
    };

    let value: Value =
        serde_json::from_str(&trimmed[start..=end]).map_err(|_| VerdictError::MalformedJson {
            raw: raw.to_string(),
        })?;

    let object = value.as_object().ok_or_else(|| VerdictError::MalformedJson {
        raw: raw.to_string(),
    })?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(VerdictError::MissingFields { fields: missing });
    }

    let details = object["details"]
        .as_object()
        .ok_or_else(|| VerdictError::MalformedResult("details is not an object".to_string()))?;
    let missing_details: Vec<String> = REQUIRED_DETAIL_FIELDS
        .iter()
        .filter(|field| !details.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing_details.is_empty() {
        return Err(VerdictError::MissingDetailFields {
            fields: missing_details,
        });
    }

    if !object["isScam"].is_boolean() {
        return Err(VerdictError::MalformedResult(
            "isScam is not a boolean".to_string(),
        ));
    }
    if !object["confidence"].is_number() {
        return Err(VerdictError::MalformedResult(
            "confidence is not a number".to_string(),
        ));
    }
    if !object["reasons"].is_array() {
        return Err(VerdictError::MalformedResult(
            "reasons is not an array".to_string(),
        ));
    }
    match object["riskLevel"].as_str() {
        Some("high") | Some("medium") | Some("low") => {}
        other => {
            return Err(VerdictError::MalformedResult(format!(
                "riskLevel must be one of high/medium/low, got {:?}",
                other
            )))
        }
    }

    serde_json::from_value(value).map_err(|e| VerdictError::MalformedResult(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;

    fn well_formed() -> String {
        serde_json::json!({
            "isScam": true,
            "confidence": 0.92,
            "reasons": ["緊急性を煽る表現", "口座情報の要求"],
            "riskLevel": "high",
            "details": {
                "urgency": { "detected": true, "examples": ["今すぐ"] },
                "moneyRequest": { "detected": false, "examples": [] },
                "personalInfo": { "detected": true, "examples": ["口座情報"] },
                "unnaturalInvitation": { "detected": false, "examples": [] },
                "fearAppeal": { "detected": true, "examples": ["罰金が発生します"] },
                "suspiciousUrl": { "detected": false, "examples": [] },
                "suspiciousSender": { "detected": false, "examples": [] },
                "otherRisks": { "detected": false, "examples": [] }
            }
        })
        .to_string()
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let reply = format!("Here is the result: {} Thanks!", well_formed());
        let verdict = parse_verdict(&reply).unwrap();
        assert!(verdict.is_scam);
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert!(verdict.details.urgency.detected);
    }

    #[test]
    fn parses_json_in_code_fence() {
        let reply = format!("```json\n{}\n```", well_formed());
        assert!(parse_verdict(&reply).is_ok());
    }

    #[test]
    fn rejects_reply_without_json() {
        let err = parse_verdict("申し訳ありませんが判定できません。").unwrap_err();
        assert!(matches!(err, VerdictError::NoJson { .. }));
    }

    #[test]
    fn malformed_json_surfaces_raw_text() {
        let err = parse_verdict("{ isScam: yes, }").unwrap_err();
        match err {
            VerdictError::MalformedJson { raw } => assert!(raw.contains("isScam")),
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn missing_top_level_fields_are_named() {
        let reply = r#"{ "isScam": false, "confidence": 0.1 }"#;
        match parse_verdict(reply).unwrap_err() {
            VerdictError::MissingFields { fields } => {
                assert_eq!(fields, vec!["reasons", "riskLevel", "details"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn missing_detail_fields_are_named() {
        let mut value: serde_json::Value = serde_json::from_str(&well_formed()).unwrap();
        value["details"].as_object_mut().unwrap().remove("fearAppeal");
        match parse_verdict(&value.to_string()).unwrap_err() {
            VerdictError::MissingDetailFields { fields } => {
                assert_eq!(fields, vec!["fearAppeal"]);
            }
            other => panic!("expected MissingDetailFields, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_risk_level() {
        let mut value: serde_json::Value = serde_json::from_str(&well_formed()).unwrap();
        value["riskLevel"] = "critical".into();
        let err = parse_verdict(&value.to_string()).unwrap_err();
        assert!(matches!(err, VerdictError::MalformedResult(_)));
    }

    #[test]
    fn rejects_non_boolean_is_scam() {
        let mut value: serde_json::Value = serde_json::from_str(&well_formed()).unwrap();
        value["isScam"] = "true".into();
        let err = parse_verdict(&value.to_string()).unwrap_err();
        assert!(matches!(err, VerdictError::MalformedResult(_)));
    }

    #[test]
    fn rejects_non_numeric_confidence() {
        let mut value: serde_json::Value = serde_json::from_str(&well_formed()).unwrap();
        value["confidence"] = "0.9".into();
        let err = parse_verdict(&value.to_string()).unwrap_err();
        assert!(matches!(err, VerdictError::MalformedResult(_)));
    }

    #[test]
    fn validation_is_idempotent() {
        let first = parse_verdict(&well_formed()).unwrap();
        let reserialized = serde_json::to_string(&first).unwrap();
        let second = parse_verdict(&reserialized).unwrap();
        assert_eq!(first, second);
    }
}
