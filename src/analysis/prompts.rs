//! Instructions and response schema for email risk analysis

use serde_json::{Value, json};

use super::types::{RiskLevel, Severity};

/// System instruction fixing the analyst persona
pub const SYSTEM_INSTRUCTION: &str = r#"You are a world-class cybersecurity expert specializing in email fraud detection (phishing, BEC, spoofing, advance-fee scams). Your task is to provide structural analysis of user-provided emails and return precise risk assessments."#;

/// Mime type that switches the service into structured output mode
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Build the task prompt with the email embedded verbatim in a delimited block.
pub fn analysis_prompt(email_text: &str) -> String {
    format!(
        "Analyze the following email content for potential security risks, scams, phishing, or fraud. Be thorough and cynical.\n\n\
         EMAIL CONTENT:\n\
         \"\"\"\n\
         {}\n\
         \"\"\"",
        email_text
    )
}

/// Response schema in the service's OpenAPI subset. Every field is required.
pub fn response_schema() -> Value {
    let risk_levels: Vec<&str> = RiskLevel::ALL.iter().map(|l| l.as_str()).collect();
    let severities: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "riskScore": {
                "type": "NUMBER",
                "description": "A numeric score from 0 (Safe) to 100 (Extremely Dangerous)."
            },
            "riskLevel": {
                "type": "STRING",
                "format": "enum",
                "enum": risk_levels,
                "description": "One of: LOW, MEDIUM, HIGH, CRITICAL"
            },
            "summary": {
                "type": "STRING",
                "description": "A concise 2-sentence summary of the overall assessment."
            },
            "redFlags": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "severity": {
                            "type": "STRING",
                            "format": "enum",
                            "enum": severities
                        }
                    },
                    "required": ["category", "description", "severity"]
                }
            },
            "senderAnalysis": {
                "type": "STRING",
                "description": "Analysis of the sender's email address or claimed identity."
            },
            "linkAnalysis": {
                "type": "STRING",
                "description": "Assessment of any links or attachments mentioned."
            },
            "toneAnalysis": {
                "type": "STRING",
                "description": "Analysis of the language, urgency, and emotional manipulation."
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 3-4 actionable steps for the user."
            }
        },
        "required": [
            "riskScore",
            "riskLevel",
            "summary",
            "redFlags",
            "senderAnalysis",
            "linkAnalysis",
            "toneAnalysis",
            "recommendations"
        ]
    })
}
