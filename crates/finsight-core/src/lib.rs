//! Core of the FinSight document Q&A service: PDF text assembly, prompt
//! construction, the generation client, and configuration.

pub mod ask;
pub mod backend;
pub mod config;
pub mod config_file;
pub mod document;
pub mod generation;
pub mod prompt;

// Re-export for convenience
pub use ask::{AskError, AskRequest, GeneratedAnswer, MISSING_FIELDS_MESSAGE, answer_question};
pub use backend::{BackendError, PdfBackend};
pub use config::{AllowedOrigins, Config, CorsSettings};
pub use document::{
    ExtractedText, MAX_CONTEXT_CHARS, extract_document, is_pdf_filename, looks_like_pdf,
};
pub use generation::{CohereClient, GenerationBackend, GenerationError, GenerationParams};
