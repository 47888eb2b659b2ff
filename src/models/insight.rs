use serde::{Deserialize, Serialize};

use crate::models::Transcript;

/// Default number of takeaways requested from the model
pub const DEFAULT_TAKEAWAY_COUNT: usize = 5;

/// Default number of quotes requested from the model
pub const DEFAULT_QUOTE_COUNT: usize = 3;

/// One pipeline run's input: the transcript plus per-task parameters
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub transcript: Transcript,
    pub takeaway_count: usize,
    pub quote_count: usize,
}

impl ExtractionRequest {
    pub fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            takeaway_count: DEFAULT_TAKEAWAY_COUNT,
            quote_count: DEFAULT_QUOTE_COUNT,
        }
    }
}

/// A notable quote attributed to a speaker.
///
/// Only quotes that pass verification are ever surfaced; there is no
/// `verified` flag on the output shape.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Quote {
    pub timestamp: String,
    pub speaker: String,
    pub text: String,
}

/// Fact-check verdict - restricted enum so out-of-vocabulary model output
/// is rejected rather than coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Verified true")]
    VerifiedTrue,
    #[serde(rename = "Possibly outdated/inaccurate")]
    PossiblyInaccurate,
    #[serde(rename = "Unverifiable")]
    Unverifiable,
}

impl Verdict {
    /// The full verdict vocabulary, passed explicitly to the claim verifier
    pub const ALL: [Verdict; 3] = [
        Verdict::VerifiedTrue,
        Verdict::PossiblyInaccurate,
        Verdict::Unverifiable,
    ];

    /// Parse a verdict from its wire string
    pub fn parse(raw: &str) -> Option<Verdict> {
        match raw.trim() {
            "Verified true" => Some(Verdict::VerifiedTrue),
            "Possibly outdated/inaccurate" => Some(Verdict::PossiblyInaccurate),
            "Unverifiable" => Some(Verdict::Unverifiable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::VerifiedTrue => "Verified true",
            Verdict::PossiblyInaccurate => "Possibly outdated/inaccurate",
            Verdict::Unverifiable => "Unverifiable",
        }
    }
}

/// A fact-checked claim with its verdict and confidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub claim: String,
    pub verification: Verdict,
    pub confidence: f64,
}

impl Verification {
    /// Build a verification, rejecting anything outside the allowed verdict
    /// set or the inclusive [0.0, 1.0] confidence range.
    pub fn checked(
        claim: String,
        verdict_raw: &str,
        confidence: f64,
        allowed: &[Verdict],
    ) -> Option<Self> {
        let verification = Verdict::parse(verdict_raw)?;
        if !allowed.contains(&verification) {
            return None;
        }
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return None;
        }
        Some(Self {
            claim,
            verification,
            confidence,
        })
    }
}

/// Aggregate output of one pipeline run.
///
/// Every field defaults to empty independently; one failed task never
/// corrupts the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineResult {
    pub summary: String,
    #[serde(rename = "takeAways")]
    pub take_aways: Vec<String>,
    pub quotes: Vec<Quote>,
    pub tags: Vec<String>,
    #[serde(rename = "factChecks")]
    pub fact_checks: Vec<Verification>,
}

/// Allow-list of topic tags, injected from an external source
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TagVocabulary {
    pub tags: Vec<String>,
}

impl TagVocabulary {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
