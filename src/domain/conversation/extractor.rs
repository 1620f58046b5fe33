//! Preference extraction from model replies.
//!
//! The collector prompt asks the model to finish every reply with a JSON
//! object of newly learned preferences. This module splits that trailer off
//! the conversational text and merges its fields into a [`PreferenceSet`].
//!
//! The trailer is located by the *last* `{` in the reply, so braces quoted
//! earlier in the prose do not confuse extraction as long as the real object
//! comes last. Anything malformed is reported and skipped, never fatal.

use serde_json::{Map, Value};
use thiserror::Error;

use super::PreferenceSet;

/// Errors that can occur while parsing a preference trailer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    Malformed(String),

    #[error("trailer is valid JSON but not an object")]
    NotAnObject,
}

/// What happened when a reply was run through [`merge_preferences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// No `{ ... }` span at the end of the reply.
    NoTrailer,
    /// A trailer was found but could not be used.
    Rejected(ExtractionError),
    /// The trailer parsed; `keys` lists the fields that were merged.
    Merged { keys: Vec<String> },
}

impl ExtractionOutcome {
    /// Keys merged by this extraction, empty unless `Merged`.
    pub fn merged_keys(&self) -> &[String] {
        match self {
            Self::Merged { keys } => keys,
            _ => &[],
        }
    }
}

/// A model reply split into display text and structured trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitResponse<'a> {
    /// Text shown to the traveler and recorded in history.
    pub conversational: &'a str,
    /// Everything from the last `{` onward, if any.
    pub trailer: Option<&'a str>,
}

/// Splits a raw reply at its last `{`.
///
/// The conversational half is trimmed. With no `{` at all the reply is
/// returned untouched and there is no trailer.
pub fn split_response(raw: &str) -> SplitResponse<'_> {
    match raw.trim_end().rfind('{') {
        Some(start) => SplitResponse {
            conversational: raw[..start].trim(),
            trailer: Some(&raw[start..]),
        },
        None => SplitResponse {
            conversational: raw,
            trailer: None,
        },
    }
}

/// Locates and parses the trailing JSON object in `text`.
///
/// Returns `Ok(None)` when there is no `{ ... }` span (either brace missing,
/// or the last `}` precedes the last `{`).
pub fn parse_trailer(text: &str) -> Result<Option<Map<String, Value>>, ExtractionError> {
    let trimmed = text.trim_end();
    let (start, end) = match (trimmed.rfind('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => return Ok(None),
    };

    let value: Value = serde_json::from_str(&trimmed[start..=end])
        .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

    match value {
        Value::Object(object) => Ok(Some(object)),
        _ => Err(ExtractionError::NotAnObject),
    }
}

/// Merges the preferences found in `raw_text` into `preferences`.
///
/// Fields whose value is `null`, or whose string form is blank, are dropped.
/// Accepted fields overwrite existing values for the same key.
pub fn merge_preferences(raw_text: &str, preferences: &mut PreferenceSet) -> ExtractionOutcome {
    let object = match parse_trailer(raw_text) {
        Ok(Some(object)) => object,
        Ok(None) => return ExtractionOutcome::NoTrailer,
        Err(err) => {
            tracing::warn!(error = %err, "Discarding unusable preference trailer");
            return ExtractionOutcome::Rejected(err);
        }
    };

    let mut keys = Vec::new();
    for (key, value) in object {
        if let Some(text) = preference_value(&value) {
            if preferences.insert(key.clone(), text) {
                keys.push(key);
            }
        }
    }

    if !keys.is_empty() {
        tracing::debug!(?keys, "Merged preferences from trailer");
    }

    ExtractionOutcome::Merged { keys }
}

/// String form of a JSON value, or `None` if it carries nothing.
///
/// Strings are kept verbatim. Other scalars and containers are stored as
/// their compact JSON text (`true`, `7`, `["a","b"]`), never as a
/// language-specific rendering, so the value reads back as valid JSON in
/// the next prompt.
fn preference_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
