pub mod handler;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod tasks;
pub mod verify;

pub use handler::{handle_request, ApiResponse};
pub use io::{load_tag_vocabulary, load_transcript_value};
pub use llm::{
    recover, AnthropicClient, AnthropicConfig, BackoffPolicy, GatewayError, ModelBackend,
    ModelError, ModelGateway, ModelResponse,
};
pub use models::{
    ExtractionRequest, PipelineResult, Quote, TagVocabulary, Transcript, Utterance, Verdict,
    Verification,
};
pub use pipeline::Pipeline;
