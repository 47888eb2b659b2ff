use tracing::{debug, warn};

use crate::llm::{quote_check_prompt, ModelGateway};
use crate::models::Transcript;

/// Normalize text for quote matching: fold smart punctuation to ASCII,
/// lowercase, and collapse whitespace
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2015}' => '-',
            '\u{2026}' => '.',
            '\u{00A0}' => ' ',
            c => c,
        })
        .collect();

    folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looser form: alphanumeric characters only, for quotes where the model
/// dropped punctuation
pub fn normalize_loose(text: &str) -> String {
    normalize(text)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Confirm a claimed quote is genuinely present in the transcript.
///
/// Cheap deterministic checks run first: strict normalized substring, then
/// alphanumeric-only substring. Only a near-miss pays for a secondary model
/// call, a strict yes/no question whose normalized answer must contain
/// "yes". A "no", an ambiguous answer, or a gateway failure drops the quote.
pub async fn verify_quote(
    gateway: &ModelGateway,
    transcript: &Transcript,
    quote_text: &str,
) -> bool {
    let haystack = normalize(&transcript.full_text());
    let needle = normalize(quote_text);
    if !needle.is_empty() && haystack.contains(&needle) {
        return true;
    }

    let loose_haystack = normalize_loose(&transcript.full_text());
    let loose_needle = normalize_loose(quote_text);
    if !loose_needle.is_empty() && loose_haystack.contains(&loose_needle) {
        return true;
    }

    debug!(quote = quote_text, "quote not found verbatim, asking model");
    match gateway.invoke(&quote_check_prompt(quote_text, transcript)).await {
        Ok(response) => {
            let accepted = normalize(&response.text).contains("yes");
            if !accepted {
                warn!(quote = quote_text, "quote rejected by fallback check");
            }
            accepted
        }
        Err(e) => {
            warn!(quote = quote_text, error = %e, "quote fallback check failed");
            false
        }
    }
}
