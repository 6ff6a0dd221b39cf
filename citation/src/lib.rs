pub mod models;
pub mod prompt;
pub mod completion;
pub mod openai_service;

pub use models::*;
pub use prompt::{build_citation_request, SYSTEM_INSTRUCTION};
pub use completion::CompletionClient;
pub use openai_service::OpenAiService;
