use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
///
/// Exactly one of `text` / `image` is expected to carry content. `image` is
/// a base64 data URL produced by the browser's `FileReader`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl AnalyzeRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    pub fn from_image(data_url: impl Into<String>) -> Self {
        Self {
            text: None,
            image: Some(data_url.into()),
        }
    }
}

/// Overall risk tier assigned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// Per-category evidence: whether the indicator was detected, with the
/// offending phrases quoted from the analyzed text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryFinding {
    pub detected: bool,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// The eight fixed scam-indicator categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictDetails {
    pub urgency: CategoryFinding,
    pub money_request: CategoryFinding,
    pub personal_info: CategoryFinding,
    pub unnatural_invitation: CategoryFinding,
    pub fear_appeal: CategoryFinding,
    pub suspicious_url: CategoryFinding,
    pub suspicious_sender: CategoryFinding,
    pub other_risks: CategoryFinding,
}

/// The authoritative response contract of `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamVerdict {
    pub is_scam: bool,
    /// Model confidence in its own verdict, in `[0, 1]`.
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub risk_level: RiskLevel,
    pub details: VerdictDetails,
}

/// Top-level keys every verdict must carry.
pub const REQUIRED_FIELDS: [&str; 5] =
    ["isScam", "confidence", "reasons", "riskLevel", "details"];

/// Category keys every `details` object must carry.
pub const REQUIRED_DETAIL_FIELDS: [&str; 8] = [
    "urgency",
    "moneyRequest",
    "personalInfo",
    "unnaturalInvitation",
    "fearAppeal",
    "suspiciousUrl",
    "suspiciousSender",
    "otherRisks",
];
