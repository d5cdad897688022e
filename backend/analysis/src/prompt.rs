//! Fixed prompt templates for the OCR and classification calls.
//!
//! The templates are deliberately frozen: the JSON shape embedded in the
//! classification prompt is the same contract `parse_verdict` validates
//! against, and all user-facing strings are Japanese because the product
//! serves Japanese elderly users.

/// System prompt for the OCR pre-step.
pub const OCR_SYSTEM_PROMPT: &str = "あなたはOCRの専門家です。
以下の点に注意して画像からテキストを抽出してください：
1. 画像内の全てのテキストを漏れなく抽出
2. レイアウトや改行を保持
3. 数字や記号も正確に抽出
4. 日本語テキストはそのまま抽出
5. 抽出したテキストはそのまま返してください（翻訳や説明は不要）";

/// User prompt accompanying the image in the OCR pre-step.
pub const OCR_USER_PROMPT: &str = "この画像に含まれる全てのテキストを抽出してください。レイアウトや改行を保持し、可能な限り正確に抽出してください。";

/// System prompt framing the assistant as a scam-detection expert.
pub const CLASSIFY_SYSTEM_PROMPT: &str = "あなたは高齢者向け詐欺を判定する専門家です。
以下の点に注意してください：
1. 全ての説明や理由は日本語で返してください
2. 例文も日本語で返してください
3. 技術用語は必要に応じて日本語に翻訳してください
4. 必ず有効なJSONのみを返してください
5. 余分な説明は不要です";

pub const OCR_MAX_TOKENS: u32 = 1000;
pub const CLASSIFY_MAX_TOKENS: u32 = 800;
pub const CLASSIFY_TEMPERATURE: f32 = 0.3;

/// Build the classification user prompt with the candidate text embedded.
pub fn classification_prompt(content: &str) -> String {
    format!(
        r#"テキストを分析し、詐欺の可能性を評価してください。以下のJSON形式で返してください：

{{
  "isScam": boolean,
  "confidence": number (0-1),
  "reasons": string[],
  "riskLevel": "high" | "medium" | "low",
  "details": {{
    "urgency": {{ "detected": boolean, "examples": string[] }},
    "moneyRequest": {{ "detected": boolean, "examples": string[] }},
    "personalInfo": {{ "detected": boolean, "examples": string[] }},
    "unnaturalInvitation": {{ "detected": boolean, "examples": string[] }},
    "fearAppeal": {{ "detected": boolean, "examples": string[] }},
    "suspiciousUrl": {{ "detected": boolean, "examples": string[] }},
    "suspiciousSender": {{ "detected": boolean, "examples": string[] }},
    "otherRisks": {{ "detected": boolean, "examples": string[] }}
  }}
}}

注意事項：
- 全ての説明や理由は日本語で返してください
- 例文も日本語で返してください
- 技術用語は必要に応じて日本語に翻訳してください

テキスト：
{content}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamlens_core::REQUIRED_DETAIL_FIELDS;

    #[test]
    fn prompt_embeds_the_candidate_text() {
        let prompt = classification_prompt("明日の会議は10時からです");
        assert!(prompt.ends_with("明日の会議は10時からです"));
    }

    #[test]
    fn prompt_names_every_contract_field() {
        let prompt = classification_prompt("test");
        assert!(prompt.contains("\"isScam\""));
        assert!(prompt.contains("\"riskLevel\""));
        for field in REQUIRED_DETAIL_FIELDS {
            assert!(prompt.contains(field), "prompt missing {field}");
        }
    }
}
