//! Structured risk assessment returned by the analysis service

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use super::AnalysisError;

/// Coarse classification summarizing the numeric risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single suspicious indicator found in the email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub category: String,
    pub description: String,
    pub severity: Severity,
}

/// Full assessment of one email. Field names match the response schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 (safe) to 100 (extremely dangerous); not range-checked
    #[serde(deserialize_with = "deserialize_score")]
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub summary: String,
    pub red_flags: Vec<RedFlag>,
    pub sender_analysis: String,
    pub link_analysis: String,
    pub tone_analysis: String,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Parse a service payload. Any syntax error or missing field is a malformed response.
    pub fn from_json(payload: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// The schema declares the score as a JSON number, so whole floats like `92.0`
/// are accepted. Fractions and negatives are rejected.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!(
            "riskScore must be a non-negative integer, got {}",
            value
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "riskScore": 92,
        "riskLevel": "CRITICAL",
        "summary": "This is a credential phishing attempt. The link is disguised.",
        "redFlags": [
            {"category": "Urgency", "description": "Demands action now.", "severity": "high"},
            {"category": "Link", "description": "URL shortener hides target.", "severity": "medium"},
            {"category": "Greeting", "description": "Generic salutation.", "severity": "low"}
        ],
        "senderAnalysis": "No identifiable sender.",
        "linkAnalysis": "bit.ly link to an unknown host.",
        "toneAnalysis": "Pressure and excitement.",
        "recommendations": ["Do not click the link", "Report to IT", "Delete the email"]
    }"#;

    #[test]
    fn test_parse_well_formed_payload() {
        let result = AnalysisResult::from_json(PAYLOAD).unwrap();
        assert_eq!(result.risk_score, 92);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.red_flags.len(), 3);
        assert_eq!(result.red_flags[0].category, "Urgency");
        assert_eq!(result.red_flags[0].severity, Severity::High);
        assert_eq!(result.red_flags[2].severity, Severity::Low);
        assert_eq!(result.recommendations[1], "Report to IT");
    }

    #[test]
    fn test_reserialize_preserves_fields_and_order() {
        let original: serde_json::Value = serde_json::from_str(PAYLOAD).unwrap();
        let result = AnalysisResult::from_json(PAYLOAD).unwrap();
        let reserialized = serde_json::to_value(&result).unwrap();
        assert_eq!(reserialized, original);
    }

    #[test]
    fn test_whole_float_score_accepted() {
        let payload = PAYLOAD.replace("\"riskScore\": 92", "\"riskScore\": 92.0");
        let result = AnalysisResult::from_json(&payload).unwrap();
        assert_eq!(result.risk_score, 92);
    }

    #[test]
    fn test_out_of_range_score_is_not_validated() {
        let payload = PAYLOAD.replace("\"riskScore\": 92", "\"riskScore\": 150");
        let result = AnalysisResult::from_json(&payload).unwrap();
        assert_eq!(result.risk_score, 150);
    }

    #[test]
    fn test_fractional_or_negative_score_rejected() {
        for bad in ["92.5", "-1"] {
            let payload = PAYLOAD.replace("\"riskScore\": 92", &format!("\"riskScore\": {}", bad));
            assert!(matches!(
                AnalysisResult::from_json(&payload),
                Err(AnalysisError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut value: serde_json::Value = serde_json::from_str(PAYLOAD).unwrap();
        value.as_object_mut().unwrap().remove("toneAnalysis");
        let err = AnalysisResult::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
        assert!(err.to_string().contains("toneAnalysis"));
    }

    #[test]
    fn test_unknown_enum_value_is_malformed() {
        let payload = PAYLOAD.replace("\"CRITICAL\"", "\"SEVERE\"");
        assert!(matches!(
            AnalysisResult::from_json(&payload),
            Err(AnalysisError::MalformedResponse(_))
        ));

        let payload = PAYLOAD.replace("\"severity\": \"high\"", "\"severity\": \"HIGH\"");
        assert!(AnalysisResult::from_json(&payload).is_err());
    }

    #[test]
    fn test_prose_payload_is_malformed() {
        let err = AnalysisResult::from_json("This email looks suspicious.").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_risk_level_display_matches_wire_format() {
        for level in RiskLevel::ALL {
            let wire = serde_json::to_string(&level).unwrap();
            assert_eq!(wire, format!("\"{}\"", level));
        }
        for severity in Severity::ALL {
            let wire = serde_json::to_string(&severity).unwrap();
            assert_eq!(wire, format!("\"{}\"", severity));
        }
    }
}
