//! The structured recommendation the model is asked to produce

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A parsed investment recommendation
///
/// `signal` is free-form text in practice, but BUY, SELL and HOLD are the
/// contract and what the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Investment signal: BUY, SELL, or HOLD
    pub signal: String,

    /// Explanation for the recommendation
    pub reasoning: String,

    /// Key factors that influenced the decision
    pub key_factors: Vec<String>,

    /// Potential risks to the recommendation
    pub risks: Vec<String>,
}

/// JSON Schema for [`Recommendation`], embedded in the prompt's format
/// instructions
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "signal": {
                "type": "string",
                "description": "Investment signal: BUY, SELL, or HOLD"
            },
            "reasoning": {
                "type": "string",
                "description": "Explanation for the recommendation"
            },
            "key_factors": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Key factors that influenced the decision"
            },
            "risks": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Potential risks to the recommendation"
            }
        },
        "required": ["signal", "reasoning", "key_factors", "risks"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_all_fields() {
        let schema = output_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["signal", "reasoning", "key_factors", "risks"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
    }

    #[test]
    fn test_deserialize_model_reply() {
        let reply = r#"{
            "signal": "BUY",
            "reasoning": "Strong fundamentals and positive momentum.",
            "key_factors": ["Revenue growth", "Healthy balance sheet"],
            "risks": ["Sector rotation"]
        }"#;

        let rec: Recommendation = serde_json::from_str(reply).unwrap();
        assert_eq!(rec.signal, "BUY");
        assert_eq!(rec.key_factors.len(), 2);
        assert_eq!(rec.risks, vec!["Sector rotation"]);
    }

    #[test]
    fn test_deserialize_rejects_missing_fields() {
        let reply = r#"{ "signal": "HOLD", "reasoning": "..." }"#;
        assert!(serde_json::from_str::<Recommendation>(reply).is_err());
    }
}
