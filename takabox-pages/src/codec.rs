use thiserror::Error;

use crate::models::PageSection;

/// Sections are stored and shipped as a JSON string, not a JSON array. This
/// codec is the only place that string is produced or read.
#[derive(Debug, Error)]
pub enum SectionCodecError {
    #[error("failed to encode sections: {0}")]
    Encode(serde_json::Error),
    #[error("sections payload is not a valid section array: {0}")]
    Decode(serde_json::Error),
}

pub fn encode_sections(sections: &[PageSection]) -> Result<String, SectionCodecError> {
    serde_json::to_string(sections).map_err(SectionCodecError::Encode)
}

/// Strict parse for write paths, so a bad admin payload is refused instead
/// of being swallowed. An empty string is an empty page, not an error.
pub fn decode_sections(raw: &str) -> Result<Vec<PageSection>, SectionCodecError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(SectionCodecError::Decode)
}

/// Lenient parse for read paths: a corrupt stored column logs a warning and
/// renders as an empty section list so the rest of the page still loads.
pub fn decode_sections_or_empty(raw: &str) -> Vec<PageSection> {
    match decode_sections(raw) {
        Ok(sections) => sections,
        Err(err) => {
            tracing::warn!(error = %err, "malformed sections payload, using empty list");
            Vec::new()
        }
    }
}
