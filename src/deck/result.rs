//! Structured compiler input derived from generated text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerateError;

/// One heading plus its lines; maps to one content slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(
        default,
        rename = "title",
        alias = "heading",
        skip_serializing_if = "Option::is_none"
    )]
    pub heading: Option<String>,

    #[serde(default, rename = "content", alias = "lines")]
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(heading: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            lines,
        }
    }
}

/// The compiler's input: a title and an ordered list of sections.
///
/// The serialized form matches the `slideData` object stored in history and
/// returned by the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, rename = "slides", alias = "sections")]
    pub sections: Vec<Section>,

    /// Scalar text payload used by the fallback slide when there are no sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl GenerationResult {
    /// Wrap a block of generated text as a single section.
    ///
    /// Lines are split on line breaks; blank lines are dropped.
    pub fn from_response_text(text: &str, heading: &str) -> Self {
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        Self {
            title: None,
            sections: vec![Section::new(heading, lines)],
            raw_text: None,
            timestamp: None,
        }
    }

    /// A result carrying only a scalar text payload and no sections.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            raw_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Decode a result received as JSON.
    ///
    /// A bare JSON string is accepted as a scalar payload. `null`, non-object
    /// values, and objects that do not match the expected shape are rejected.
    pub fn from_json(value: &Value) -> Result<Self, GenerateError> {
        match value {
            Value::Null => Err(GenerateError::invalid_input(
                "generation result is required",
            )),
            Value::String(text) => Ok(Self::from_raw_text(text.as_str())),
            Value::Object(_) => serde_json::from_value(value.clone()).map_err(|e| {
                GenerateError::invalid_input(format!("malformed generation result: {}", e))
            }),
            other => Err(GenerateError::invalid_input(format!(
                "generation result must be an object, got {}",
                json_type_name(other)
            ))),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
