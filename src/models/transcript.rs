use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single utterance from the podcast transcript
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Utterance {
    /// Timestamp code (e.g., "00:01:00")
    pub timestamp: String,
    /// Speaker name or role
    pub speaker: String,
    /// Optional section label (e.g., "Introduction")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// What was said
    pub text: String,
}

/// An episode transcript: metadata plus an ordered sequence of utterances.
///
/// Immutable for the lifetime of a pipeline run; every task reads the same
/// instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transcript {
    pub episode_id: String,
    pub title: String,
    pub host: String,
    #[serde(default)]
    pub guests: Vec<String>,
    pub utterances: Vec<Utterance>,
}

impl Transcript {
    /// Deserialize and validate a transcript from a raw JSON value.
    ///
    /// The returned error string names the offending field so it can be
    /// surfaced directly in a client error response.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err("transcript must be a JSON object".to_string());
        }

        let transcript: Transcript =
            serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        transcript.validate()?;
        Ok(transcript)
    }

    /// Semantic checks beyond deserialization
    pub fn validate(&self) -> Result<(), String> {
        if self.episode_id.trim().is_empty() {
            return Err("field `episode_id` must be non-empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("field `title` must be non-empty".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("field `host` must be non-empty".to_string());
        }
        if self.utterances.is_empty() {
            return Err("transcript must contain at least one utterance".to_string());
        }

        for (i, utterance) in self.utterances.iter().enumerate() {
            if utterance.timestamp.trim().is_empty() {
                return Err(format!("utterance {} has an empty `timestamp`", i));
            }
            if utterance.speaker.trim().is_empty() {
                return Err(format!("utterance {} has an empty `speaker`", i));
            }
            if utterance.text.trim().is_empty() {
                return Err(format!("utterance {} has an empty `text`", i));
            }
        }

        Ok(())
    }

    /// All spoken text joined with spaces, for substring checks
    pub fn full_text(&self) -> String {
        self.utterances
            .iter()
            .map(|u| u.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the transcript with speaker and timestamp annotations, the
    /// form every prompt embeds
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Episode: {} ({})\n", self.title, self.episode_id));
        out.push_str(&format!("Host: {}\n", self.host));
        if !self.guests.is_empty() {
            out.push_str(&format!("Guests: {}\n", self.guests.join(", ")));
        }
        out.push('\n');
        for utterance in &self.utterances {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                utterance.timestamp, utterance.speaker, utterance.text
            ));
        }
        out
    }
}
