use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::TagVocabulary;

/// Read a transcript file as a raw JSON value. Validation happens later in
/// the handler so the caller gets the same 400-style reasons a remote
/// client would.
pub fn load_transcript_value(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON: {:?}", path))
}

/// Load the tag allow-list from a `{"tags": [...]}` JSON file
pub fn load_tag_vocabulary(path: &Path) -> Result<TagVocabulary> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let vocabulary: TagVocabulary = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tag vocabulary: {:?}", path))?;
    Ok(vocabulary)
}
