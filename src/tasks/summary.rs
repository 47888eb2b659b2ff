use crate::llm::{summary_prompt, GatewayError, ModelGateway};
use crate::models::Transcript;

/// Extract a 200-300 word summary.
///
/// The only task whose output is the raw completion text; no JSON recovery
/// and no structural validation beyond trimming.
pub async fn extract_summary(
    gateway: &ModelGateway,
    transcript: &Transcript,
) -> Result<String, GatewayError> {
    let response = gateway.invoke(&summary_prompt(transcript)).await?;
    Ok(response.text.trim().to_string())
}
