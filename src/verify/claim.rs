use tracing::warn;

use crate::llm::{claim_verification_prompt, recover, ModelGateway};
use crate::models::{Verdict, Verification};

/// Fact-check one claim with a secondary model call.
///
/// The recovered payload must carry a verdict string inside the explicitly
/// passed allowed set and a numeric confidence in [0.0, 1.0]; anything else
/// drops the claim entirely. Absence of evidence is preferred over
/// silently-wrong evidence.
pub async fn verify_claim(
    gateway: &ModelGateway,
    claim: &str,
    allowed: &[Verdict],
) -> Option<Verification> {
    let response = match gateway.invoke(&claim_verification_prompt(claim)).await {
        Ok(response) => response,
        Err(e) => {
            warn!(claim, error = %e, "claim verification call failed");
            return None;
        }
    };

    let payload = recover(&response.text);
    if payload.is_empty() {
        warn!(claim, "claim verification returned no structured payload");
        return None;
    }

    let verdict_raw = payload.get("verification").and_then(|v| v.as_str())?;
    let confidence = payload.get("confidence").and_then(|v| v.as_f64())?;

    let verification =
        Verification::checked(claim.to_string(), verdict_raw, confidence, allowed);
    if verification.is_none() {
        warn!(
            claim,
            verdict = verdict_raw,
            confidence,
            "claim verdict rejected"
        );
    }
    verification
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::llm::{BackoffPolicy, ModelBackend, ModelError};

    struct FixedBackend(String);

    #[async_trait]
    impl ModelBackend for FixedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
            Ok(self.0.clone())
        }
    }

    fn gateway(response: &str) -> ModelGateway {
        ModelGateway::with_policy(
            Arc::new(FixedBackend(response.to_string())),
            BackoffPolicy::immediate(1),
        )
    }

    #[tokio::test]
    async fn test_valid_verdict_accepted() {
        let gw = gateway(r#"{"verification": "Verified true", "confidence": 0.9}"#);
        let v = verify_claim(&gw, "The earth orbits the sun", &Verdict::ALL)
            .await
            .unwrap();
        assert_eq!(v.verification, Verdict::VerifiedTrue);
        assert_eq!(v.confidence, 0.9);
        assert_eq!(v.claim, "The earth orbits the sun");
    }

    #[tokio::test]
    async fn test_unknown_verdict_dropped() {
        let gw = gateway(r#"{"verification": "Probably fine", "confidence": 0.9}"#);
        assert!(verify_claim(&gw, "claim", &Verdict::ALL).await.is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_confidence_dropped() {
        let gw = gateway(r#"{"verification": "Unverifiable", "confidence": 1.5}"#);
        assert!(verify_claim(&gw, "claim", &Verdict::ALL).await.is_none());

        let gw = gateway(r#"{"verification": "Unverifiable", "confidence": -0.1}"#);
        assert!(verify_claim(&gw, "claim", &Verdict::ALL).await.is_none());
    }

    #[tokio::test]
    async fn test_boundary_confidence_accepted() {
        let gw = gateway(r#"{"verification": "Unverifiable", "confidence": 0.0}"#);
        assert!(verify_claim(&gw, "claim", &Verdict::ALL).await.is_some());

        let gw = gateway(r#"{"verification": "Unverifiable", "confidence": 1.0}"#);
        assert!(verify_claim(&gw, "claim", &Verdict::ALL).await.is_some());
    }

    #[tokio::test]
    async fn test_non_numeric_confidence_dropped() {
        let gw = gateway(r#"{"verification": "Unverifiable", "confidence": "high"}"#);
        assert!(verify_claim(&gw, "claim", &Verdict::ALL).await.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_response_dropped() {
        let gw = gateway("I am not sure about this one.");
        assert!(verify_claim(&gw, "claim", &Verdict::ALL).await.is_none());
    }

    #[tokio::test]
    async fn test_prose_wrapped_verdict_recovered() {
        let gw = gateway(
            "Here is my assessment: {\"verification\": \"Possibly outdated/inaccurate\", \"confidence\": 0.4}",
        );
        let v = verify_claim(&gw, "claim", &Verdict::ALL).await.unwrap();
        assert_eq!(v.verification, Verdict::PossiblyInaccurate);
    }
}
