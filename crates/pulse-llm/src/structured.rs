//! Structured-output helpers
//!
//! Chat models asked for machine-readable output are told the exact JSON
//! shape to produce, then tend to wrap the reply in markdown fences or
//! surrounding prose anyway. This module provides both halves: the
//! instruction block to embed in a prompt, and a tolerant parser that digs
//! the JSON object out of the reply before deserializing it.

use crate::{LlmError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Build the format-instructions block for a prompt
///
/// # Arguments
///
/// * `schema` - A JSON value describing the expected reply shape (field
///   names mapped to short descriptions)
///
/// # Returns
///
/// A prompt fragment instructing the model to reply with a single JSON
/// object conforming to the schema
pub fn format_instructions(schema: &Value) -> String {
    let schema_text = serde_json::to_string_pretty(schema).unwrap_or_default();
    format!(
        "Respond ONLY with a single JSON object conforming to the schema below. \
         Do not include any text before or after the JSON object.\n\n\
         ```json\n{schema_text}\n```"
    )
}

/// Parse a model reply into a typed record
///
/// Extraction order: a fenced ```json block if present, otherwise the
/// outermost brace-delimited span, otherwise the trimmed reply as-is.
/// Deserialization failures surface as [`LlmError::SerializationError`];
/// a reply with no JSON object at all surfaces as
/// [`LlmError::UnexpectedResponse`].
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T> {
    let candidate = extract_json_candidate(text)?;
    Ok(serde_json::from_str(candidate)?)
}

/// Locate the JSON object span inside a raw model reply
fn extract_json_candidate(text: &str) -> Result<&str> {
    // Fenced block first: ```json ... ``` or bare ``` ... ```
    if let Ok(fence) = regex::Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```") {
        if let Some(caps) = fence.captures(text) {
            if let Some(body) = caps.get(1) {
                return Ok(body.as_str());
            }
        }
    }

    // Outermost braces next; covers bare JSON and JSON inside prose
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return Ok(&text[start..=end]);
        }
    }

    Err(LlmError::UnexpectedResponse(
        "No JSON object found in model reply".to_string(),
    ))
}
