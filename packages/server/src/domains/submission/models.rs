//! Submission domain models.

/// Normalized, validated submission ready for the review workflow.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    /// Trimmed business name
    pub name: String,

    /// Canonical website, if provided
    pub url: Option<String>,

    /// Filesystem-safe identifier derived from the name; seeds the record
    /// filename and the review branch name
    pub slug: String,

    /// The full submitted payload, preserved verbatim so fields beyond the
    /// validated ones survive into the committed record file
    pub payload: serde_json::Value,
}

impl ValidatedSubmission {
    /// Record file content: pretty-printed JSON of the submitted payload.
    pub fn record_json(&self) -> String {
        serde_json::to_string_pretty(&self.payload)
            .expect("serializing a JSON value cannot fail")
    }
}

/// Derive the storage slug from a business name: lowercase, trimmed, every
/// character outside `[a-z0-9]` replaced by `-`.
///
/// Deliberately positional (consecutive separators are not collapsed) so
/// the transform stays reproducible and idempotent.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}
