//! Inbound submission validation and normalization.

use super::models::{slugify, ValidatedSubmission};
use super::SubmissionError;

/// Turns an untrusted request body into a normalized submission.
///
/// Everything wrong with the payload fails here with `InvalidInput`,
/// before any remote work is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, raw: &str) -> Result<ValidatedSubmission, SubmissionError> {
        let payload: serde_json::Value = serde_json::from_str(raw)
            .map_err(|_| SubmissionError::InvalidInput("Invalid JSON body.".to_string()))?;

        let name = payload
            .get("name")
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                SubmissionError::InvalidInput("Missing or invalid business name.".to_string())
            })?;

        let url = payload
            .get("url")
            .and_then(|value| value.as_str())
            .map(str::to_string);

        Ok(ValidatedSubmission {
            slug: slugify(name),
            name: name.to_string(),
            url,
            payload,
        })
    }
}
