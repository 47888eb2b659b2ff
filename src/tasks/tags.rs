use tracing::{debug, warn};

use crate::llm::{recover, tags_prompt, GatewayError, ModelGateway};
use crate::models::{TagVocabulary, Transcript};

/// Extract topic tags constrained to the injected allow-list.
///
/// Tags outside the vocabulary are silently filtered rather than failing
/// the task; the model sometimes invents labels despite the constrained
/// prompt.
pub async fn extract_tags(
    gateway: &ModelGateway,
    transcript: &Transcript,
    vocabulary: &TagVocabulary,
) -> Result<Vec<String>, GatewayError> {
    if vocabulary.is_empty() {
        warn!("tag vocabulary is empty, skipping tag extraction");
        return Ok(Vec::new());
    }

    let response = gateway
        .invoke(&tags_prompt(transcript, &vocabulary.tags))
        .await?;
    let payload = recover(&response.text);

    let Some(items) = payload.get("tags").and_then(|v| v.as_array()) else {
        warn!("tags payload missing or not an array");
        return Ok(Vec::new());
    };

    let mut tags = Vec::new();
    for item in items {
        let Some(tag) = item.as_str() else { continue };
        if vocabulary.contains(tag) {
            tags.push(tag.to_string());
        } else {
            debug!(tag, "dropping tag outside vocabulary");
        }
    }

    Ok(tags)
}
