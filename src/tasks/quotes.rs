use tracing::warn;

use crate::llm::{quotes_prompt, recover, GatewayError, ModelGateway};
use crate::models::{Quote, Transcript};
use crate::verify::verify_quote;

/// Extract up to `n` notable quotes, keeping only those the verifier can
/// place in the transcript. Unverified quotes are dropped, never returned
/// with a flag.
pub async fn extract_quotes(
    gateway: &ModelGateway,
    transcript: &Transcript,
    n: usize,
) -> Result<Vec<Quote>, GatewayError> {
    let response = gateway.invoke(&quotes_prompt(transcript, n)).await?;
    let payload = recover(&response.text);

    let Some(items) = payload.get("quotes").cloned() else {
        warn!("quotes payload missing");
        return Ok(Vec::new());
    };

    let candidates: Vec<Quote> = match serde_json::from_value(items) {
        Ok(quotes) => quotes,
        Err(e) => {
            warn!(error = %e, "quotes payload has wrong shape, discarding");
            return Ok(Vec::new());
        }
    };

    let mut verified = Vec::with_capacity(candidates.len());
    for quote in candidates {
        if verify_quote(gateway, transcript, &quote.text).await {
            verified.push(quote);
        } else {
            warn!(quote = %quote.text, "dropping unverified quote");
        }
    }

    Ok(verified)
}
