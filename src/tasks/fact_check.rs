use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::llm::{claim_extraction_prompt, recover, GatewayError, ModelGateway};
use crate::models::{Transcript, Verdict, Verification};
use crate::verify::verify_claim;

/// In-flight bound on per-claim verification calls, to respect backend
/// rate limits
const MAX_CONCURRENT_VERIFICATIONS: usize = 4;

/// Two-stage fact-check: extract checkable claims, then verify each with an
/// independent model call. Claims whose verdicts fail validation are
/// dropped from the result set.
pub async fn extract_fact_checks(
    gateway: &ModelGateway,
    transcript: &Transcript,
) -> Result<Vec<Verification>, GatewayError> {
    let claims = extract_claims(gateway, transcript).await?;
    if claims.is_empty() {
        return Ok(Vec::new());
    }

    info!(count = claims.len(), "verifying extracted claims");

    let verifications: Vec<Option<Verification>> = stream::iter(claims)
        .map(|claim| async move { verify_claim(gateway, &claim, &Verdict::ALL).await })
        .buffer_unordered(MAX_CONCURRENT_VERIFICATIONS)
        .collect()
        .await;

    Ok(verifications.into_iter().flatten().collect())
}

/// Stage one: pull checkable factual claims out of the transcript
async fn extract_claims(
    gateway: &ModelGateway,
    transcript: &Transcript,
) -> Result<Vec<String>, GatewayError> {
    let response = gateway.invoke(&claim_extraction_prompt(transcript)).await?;
    let payload = recover(&response.text);

    let Some(items) = payload.get("claims").and_then(|v| v.as_array()) else {
        warn!("claims payload missing or not an array");
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect())
}
