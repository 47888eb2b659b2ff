use crate::models::Transcript;

/// Build the summary prompt: free-form prose, not JSON-recovered
pub fn summary_prompt(transcript: &Transcript) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Write a 200-300 word summary of the following podcast transcript. \
         Cover the main themes, key discussion points, and any conclusions \
         reached. Respond with the summary text only.\n\n",
    );
    prompt.push_str(&transcript.render());
    prompt
}

/// Build the takeaways prompt, requesting exactly `n` items
pub fn takeaways_prompt(transcript: &Transcript, n: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Extract exactly {} key takeaways from the following podcast \
         transcript. Respond with JSON only, in the form \
         {{\"takeaways\": [\"...\", ...]}} with exactly {} entries.\n\n",
        n, n
    ));
    prompt.push_str(&transcript.render());
    prompt
}

/// Build the quotes prompt, requesting exactly `n` verbatim quotes
pub fn quotes_prompt(transcript: &Transcript, n: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Select the {} most notable quotes from the following podcast \
         transcript. Each quote must appear verbatim in the transcript; \
         light cleanup of filler words (\"um\", \"uh\") is permitted. \
         Respond with JSON only, in the form {{\"quotes\": [{{\"timestamp\": \
         \"...\", \"speaker\": \"...\", \"text\": \"...\"}}, ...]}} with \
         exactly {} entries.\n\n",
        n, n
    ));
    prompt.push_str(&transcript.render());
    prompt
}

/// Build the tags prompt, constrained to the injected allow-list
pub fn tags_prompt(transcript: &Transcript, allowed_tags: &[String]) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Choose the topic tags that apply to the following podcast \
         transcript. You MUST choose only from this list:\n",
    );
    for tag in allowed_tags {
        prompt.push_str(&format!("- {}\n", tag));
    }
    prompt.push_str(
        "\nRespond with JSON only, in the form {\"tags\": [\"...\", ...]}.\n\n",
    );
    prompt.push_str(&transcript.render());
    prompt
}

/// Build the claim-extraction prompt (fact-check stage one)
pub fn claim_extraction_prompt(transcript: &Transcript) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "List the factual claims made in the following podcast transcript \
         that could be checked against public knowledge. Respond with JSON \
         only, in the form {\"claims\": [\"...\", ...]}.\n\n",
    );
    prompt.push_str(&transcript.render());
    prompt
}

/// Build the claim-verification prompt (fact-check stage two).
/// The verdict must come back as one of the listed wire strings.
pub fn claim_verification_prompt(claim: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str("Fact-check the following claim:\n\n");
    prompt.push_str(&format!("\"{}\"\n\n", claim));
    prompt.push_str(
        "Respond with JSON only, in the form {\"verification\": \"...\", \
         \"confidence\": 0.0}. The verification value MUST be exactly one \
         of: \"Verified true\", \"Possibly outdated/inaccurate\", \
         \"Unverifiable\". Confidence MUST be a number between 0.0 and 1.0.",
    );
    prompt
}

/// Build the quote fallback-check prompt: strict yes/no
pub fn quote_check_prompt(quote_text: &str, transcript: &Transcript) -> String {
    let mut prompt = String::new();
    prompt.push_str("Does the following quote appear in the transcript below?\n\n");
    prompt.push_str(&format!("Quote: \"{}\"\n\n", quote_text));
    prompt.push_str("Answer with exactly one word: yes or no.\n\n");
    prompt.push_str(&transcript.render());
    prompt
}
