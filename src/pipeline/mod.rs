//! Request pipeline tying the generator, compiler, writer and history together.

mod naming;
mod service;

pub use naming::FileNaming;
pub use service::{clamp_history_limit, GenerationOutcome, GenerationService};

use crate::deck::GenerationResult;
use crate::error::GenerateError;

/// Parse offline input into a generation result.
///
/// Input starting with `{` is decoded as a serialized result, and input that
/// is exactly one JSON string is taken as raw text. Anything else is treated
/// as generated text and wrapped as a single section under `heading`.
pub fn parse_input(input: &str, heading: &str) -> Result<GenerationResult, GenerateError> {
    let trimmed = input.trim();
    if trimmed.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(trimmed)
            .map_err(|e| GenerateError::invalid_input(format!("invalid JSON input: {}", e)))?;
        return GenerationResult::from_json(&value);
    }
    if trimmed.starts_with('"') {
        let parsed = serde_json::from_str::<serde_json::Value>(trimmed);
        if let Ok(value @ serde_json::Value::String(_)) = parsed {
            return GenerationResult::from_json(&value);
        }
    }

    if trimmed.is_empty() {
        return Err(GenerateError::invalid_input("input is empty"));
    }
    Ok(GenerationResult::from_response_text(input, heading))
}
