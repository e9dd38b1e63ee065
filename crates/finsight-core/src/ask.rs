use thiserror::Error;

use crate::document::{MAX_CONTEXT_CHARS, truncate_chars};
use crate::generation::{GenerationBackend, GenerationError, GenerationParams};
use crate::prompt::{build_prompt, prompt_preview};

pub const MISSING_FIELDS_MESSAGE: &str = "Both context and question are required";

#[derive(Error, Debug)]
pub enum AskError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// A question about a block of document text.
#[derive(Debug, Clone, Default)]
pub struct AskRequest {
    pub context: String,
    pub question: String,
}

impl AskRequest {
    pub fn new(context: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            question: question.into(),
        }
    }

    /// Both fields must be non-empty. Whitespace-only values pass.
    pub fn validate(&self) -> Result<(), AskError> {
        if self.context.is_empty() || self.question.is_empty() {
            return Err(AskError::MissingFields);
        }
        Ok(())
    }

    /// The context cut to [`MAX_CONTEXT_CHARS`].
    pub fn safe_context(&self) -> &str {
        truncate_chars(&self.context, MAX_CONTEXT_CHARS)
    }
}

/// The trimmed text of the first generated candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAnswer(pub String);

impl GeneratedAnswer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validate, build the prompt and make a single generation call.
pub async fn answer_question(
    backend: &dyn GenerationBackend,
    params: &GenerationParams,
    request: &AskRequest,
) -> Result<GeneratedAnswer, AskError> {
    request.validate()?;

    let prompt = build_prompt(request.safe_context(), &request.question);
    tracing::debug!(
        backend = backend.name(),
        preview = prompt_preview(&prompt),
        "sending prompt"
    );

    let text = backend.generate(&prompt, params).await?;
    Ok(GeneratedAnswer(text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use super::*;

    /// Records the last prompt and replies with a fixed string.
    struct Echo {
        reply: &'static str,
        last_prompt: Mutex<Option<String>>,
    }

    impl Echo {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                last_prompt: Mutex::new(None),
            }
        }
    }

    impl GenerationBackend for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn generate<'a>(
            &'a self,
            prompt: &'a str,
            _params: &'a GenerationParams,
        ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
            Box::pin(async move {
                *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
                Ok(self.reply.to_string())
            })
        }
    }

    struct Failing;

    impl GenerationBackend for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn generate<'a>(
            &'a self,
            _prompt: &'a str,
            _params: &'a GenerationParams,
        ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
            Box::pin(async move {
                Err(GenerationError::Api {
                    status: 401,
                    message: "invalid api token".into(),
                })
            })
        }
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(AskRequest::new("", "q").validate().is_err());
        assert!(AskRequest::new("ctx", "").validate().is_err());
        assert!(AskRequest::default().validate().is_err());
        assert!(AskRequest::new(" ", " ").validate().is_ok());
    }

    #[test]
    fn missing_fields_message() {
        assert_eq!(
            AskError::MissingFields.to_string(),
            "Both context and question are required"
        );
    }

    #[test]
    fn context_is_hard_cut() {
        let req = AskRequest::new("b".repeat(MAX_CONTEXT_CHARS * 2), "q");
        assert_eq!(req.safe_context().len(), MAX_CONTEXT_CHARS);
    }

    #[tokio::test]
    async fn answer_is_trimmed() {
        let backend = Echo::new("\n  Revenue grew 12%.  \n");
        let req = AskRequest::new(
            "Revenue grew 12% to $500M in FY2023.",
            "What was the revenue growth?",
        );
        let answer = answer_question(&backend, &GenerationParams::default(), &req)
            .await
            .unwrap();
        assert_eq!(answer.as_str(), "Revenue grew 12%.");

        let prompt = backend.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("\"\"\"Revenue grew 12% to $500M in FY2023.\"\"\""));
        assert!(prompt.contains("Question:\nWhat was the revenue growth?\n"));
    }

    #[tokio::test]
    async fn long_context_is_truncated_in_prompt() {
        let backend = Echo::new("ok");
        let context = format!("{}{}", "a".repeat(MAX_CONTEXT_CHARS), "TAIL");
        let req = AskRequest::new(context, "q");
        answer_question(&backend, &GenerationParams::default(), &req)
            .await
            .unwrap();
        let prompt = backend.last_prompt.lock().unwrap().clone().unwrap();
        assert!(!prompt.contains("TAIL"));
    }

    #[tokio::test]
    async fn validation_happens_before_generation() {
        let backend = Echo::new("unused");
        let err = answer_question(&backend, &GenerationParams::default(), &AskRequest::new("", "q"))
            .await
            .unwrap_err();
        assert!(matches!(err, AskError::MissingFields));
        assert!(backend.last_prompt.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn generation_errors_keep_their_message() {
        let err = answer_question(&Failing, &GenerationParams::default(), &AskRequest::new("c", "q"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "generation API error (401): invalid api token");
    }
}
