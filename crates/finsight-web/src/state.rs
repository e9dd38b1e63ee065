use std::sync::Arc;

use finsight_core::{GenerationBackend, GenerationParams, PdfBackend};

/// Shared application state accessible from all handlers.
///
/// Built once at startup and never mutated; every request reads it
/// concurrently.
pub struct AppState {
    pub pdf_backend: Arc<dyn PdfBackend>,
    pub generator: Arc<dyn GenerationBackend>,
    pub generation_params: GenerationParams,
    /// Also require the `%PDF-` signature, on top of the filename check.
    pub sniff_magic: bool,
}

impl AppState {
    pub fn new(pdf_backend: Arc<dyn PdfBackend>, generator: Arc<dyn GenerationBackend>) -> Self {
        Self {
            pdf_backend,
            generator,
            generation_params: GenerationParams::default(),
            sniff_magic: false,
        }
    }

    pub fn with_generation_params(mut self, params: GenerationParams) -> Self {
        self.generation_params = params;
        self
    }

    pub fn with_sniff_magic(mut self, sniff_magic: bool) -> Self {
        self.sniff_magic = sniff_magic;
        self
    }
}
