use serde_json::{json, Value};
use tracing::{error, warn};

use crate::models::{ExtractionRequest, Transcript};
use crate::pipeline::Pipeline;

/// HTTP-style response produced by the request entry point
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: Value,
}

impl ApiResponse {
    fn bad_request(message: String) -> Self {
        Self {
            status_code: 400,
            body: json!({"error": "Bad Request", "message": message}),
        }
    }

    fn internal_error(message: String) -> Self {
        Self {
            status_code: 500,
            body: json!({"error": "Internal server error", "message": message}),
        }
    }
}

/// Single entry point: validate the event, run the pipeline, shape the
/// response.
///
/// Input validation failures short-circuit with a 400 before any backend
/// call. Per-task extraction failures never surface here; the pipeline
/// degrades them to empty fields and the request still returns 200.
pub async fn handle_request(pipeline: &Pipeline, event: &Value) -> ApiResponse {
    let Some(raw_transcript) = event.get("transcript") else {
        warn!("request missing `transcript` field");
        return ApiResponse::bad_request("missing field `transcript`".to_string());
    };

    let transcript = match Transcript::from_value(raw_transcript) {
        Ok(transcript) => transcript,
        Err(reason) => {
            warn!(%reason, "transcript failed validation");
            return ApiResponse::bad_request(format!("invalid transcript: {}", reason));
        }
    };

    let mut request = ExtractionRequest::new(transcript);
    if let Some(n) = event.get("takeaways").and_then(|v| v.as_u64()) {
        request.takeaway_count = n as usize;
    }
    if let Some(n) = event.get("quotes").and_then(|v| v.as_u64()) {
        request.quote_count = n as usize;
    }

    let result = pipeline.run(&request).await;

    match serde_json::to_value(&result) {
        Ok(body) => ApiResponse {
            status_code: 200,
            body,
        },
        Err(e) => {
            error!(error = %e, "failed to serialize pipeline result");
            ApiResponse::internal_error(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::llm::{BackoffPolicy, ModelBackend, ModelError, ModelGateway};
    use crate::models::TagVocabulary;

    /// Echoes a fixed takeaways payload for every prompt and counts calls
    struct EchoBackend {
        calls: Arc<AtomicU32>,
        takeaways: serde_json::Value,
    }

    #[async_trait]
    impl ModelBackend for EchoBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.takeaways.to_string())
        }
    }

    fn pipeline_with(takeaways: serde_json::Value) -> (Pipeline, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let backend = EchoBackend {
            calls: calls.clone(),
            takeaways,
        };
        let gateway =
            ModelGateway::with_policy(Arc::new(backend), BackoffPolicy::immediate(1));
        (Pipeline::new(gateway, TagVocabulary::default()), calls)
    }

    fn event() -> Value {
        json!({
            "transcript": {
                "episode_id": "ep-42",
                "title": "The Future of Work",
                "host": "Alex",
                "utterances": [
                    {"timestamp": "00:01:00", "speaker": "Host",
                     "text": "Remote work is here to stay."}
                ]
            },
            "takeaways": 5
        })
    }

    #[tokio::test]
    async fn test_exact_takeaway_count_passes_through() {
        let (pipeline, _) =
            pipeline_with(json!({"takeaways": ["a", "b", "c", "d", "e"]}));

        let response = handle_request(&pipeline, &event()).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["takeAways"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_short_takeaway_list_yields_empty_field() {
        let (pipeline, _) = pipeline_with(json!({"takeaways": ["a", "b", "c", "d"]}));

        let response = handle_request(&pipeline, &event()).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["takeAways"], json!([]));
    }

    #[tokio::test]
    async fn test_missing_transcript_is_400() {
        let (pipeline, calls) = pipeline_with(json!({}));

        let response = handle_request(&pipeline, &json!({"other": 1})).await;
        assert_eq!(response.status_code, 400);
        assert!(response.body["message"]
            .as_str()
            .unwrap()
            .contains("transcript"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_episode_id_is_400_and_no_backend_call() {
        let (pipeline, calls) = pipeline_with(json!({}));

        let mut bad_event = event();
        bad_event["transcript"]
            .as_object_mut()
            .unwrap()
            .remove("episode_id");

        let response = handle_request(&pipeline, &bad_event).await;
        assert_eq!(response.status_code, 400);
        assert!(response.body["message"]
            .as_str()
            .unwrap()
            .contains("episode_id"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_response_carries_all_result_fields() {
        let (pipeline, _) = pipeline_with(json!({"irrelevant": true}));

        let response = handle_request(&pipeline, &event()).await;
        assert_eq!(response.status_code, 200);
        for key in ["summary", "takeAways", "quotes", "tags", "factChecks"] {
            assert!(response.body.get(key).is_some(), "missing key {key}");
        }
    }
}
