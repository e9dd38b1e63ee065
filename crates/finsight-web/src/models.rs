use serde::{Deserialize, Serialize};

pub const SERVICE_BANNER: &str = "FinSight AI Backend is running!";

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub text: String,
    pub content_length: usize,
}

/// `/ask` body. Absent or `null` fields count as empty.
#[derive(Debug, Default, Deserialize)]
pub struct AskBody {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
