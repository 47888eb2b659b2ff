use tracing::warn;

use crate::llm::{recover, takeaways_prompt, GatewayError, ModelGateway};
use crate::models::Transcript;

/// Extract exactly `n` key takeaways.
///
/// All-or-nothing: the recovered `takeaways` array must contain exactly `n`
/// strings. A count mismatch, a non-string entry, or a recovery failure all
/// yield an empty list rather than a truncated one.
pub async fn extract_takeaways(
    gateway: &ModelGateway,
    transcript: &Transcript,
    n: usize,
) -> Result<Vec<String>, GatewayError> {
    let response = gateway.invoke(&takeaways_prompt(transcript, n)).await?;
    let payload = recover(&response.text);

    let Some(items) = payload.get("takeaways").and_then(|v| v.as_array()) else {
        warn!("takeaways payload missing or not an array");
        return Ok(Vec::new());
    };

    let takeaways: Vec<String> = items
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect();

    if takeaways.len() != items.len() || takeaways.len() != n {
        warn!(
            requested = n,
            returned = items.len(),
            "takeaway count mismatch, discarding"
        );
        return Ok(Vec::new());
    }

    Ok(takeaways)
}
