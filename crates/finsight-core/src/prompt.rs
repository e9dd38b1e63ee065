//! The fixed analyst prompt sent to the generation API.

use crate::document::truncate_chars;

/// Number of characters of the prompt written to the debug log.
pub const PREVIEW_CHARS: usize = 400;

/// Build the prompt for a question about a report excerpt.
///
/// Both strings are embedded verbatim. A context containing `"""` can close
/// the excerpt block early; nothing here guards against that.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "\nYou are a financial analyst. Analyze the below annual report excerpt and answer the \
         user\u{2019}s question clearly and factually.\n\
         \n\
         Report Excerpt:\n\
         \"\"\"{context}\"\"\"\n\
         \n\
         Question:\n\
         {question}\n\
         \n\
         Answer:\n"
    )
}

/// Leading slice of `prompt` suitable for logging.
pub fn prompt_preview(prompt: &str) -> &str {
    truncate_chars(prompt, PREVIEW_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_layout() {
        let prompt = build_prompt("Revenue grew 12%.", "What was the growth?");
        assert_eq!(
            prompt,
            "\nYou are a financial analyst. Analyze the below annual report excerpt and answer \
             the user\u{2019}s question clearly and factually.\n\nReport Excerpt:\n\
             \"\"\"Revenue grew 12%.\"\"\"\n\nQuestion:\nWhat was the growth?\n\nAnswer:\n"
        );
    }

    #[test]
    fn context_is_not_escaped() {
        let prompt = build_prompt("a\"\"\"b", "q");
        assert!(prompt.contains("\"\"\"a\"\"\"b\"\"\""));
    }

    #[test]
    fn preview_is_bounded() {
        let prompt = build_prompt(&"x".repeat(2_000), "q");
        assert_eq!(prompt_preview(&prompt).chars().count(), PREVIEW_CHARS);
        assert_eq!(prompt_preview("short"), "short");
    }
}
