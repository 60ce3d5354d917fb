//! The fixed answering prompt template.

use askdocs_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// The instructional template every answer request is built from.
///
/// Substitutes the retrieved context block and the user's question.
pub const ANSWER_TEMPLATE: &str = "\
You are a helpful assistant. Use the following pieces of context to answer \
the question at the end. If the context does not contain the answer, say \
that you don't know; do not make one up.

Context:
{{context}}

Question: {{query}}
Answer:";

/// Render the answering prompt from a context block and query.
pub fn render_prompt(context: &str, query: &str) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("answer", ANSWER_TEMPLATE)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let mut variables = BTreeMap::new();
    variables.insert("context", context);
    variables.insert("query", query);

    handlebars
        .render("answer", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_both_variables() {
        let prompt = render_prompt("Paris is the capital of France.", "What is the capital?")
            .unwrap();

        assert!(prompt.contains("Paris is the capital of France."));
        assert!(prompt.contains("Question: What is the capital?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_render_does_not_escape() {
        let prompt = render_prompt("a < b && c > d", "is \"this\" kept?").unwrap();
        assert!(prompt.contains("a < b && c > d"));
        assert!(prompt.contains("is \"this\" kept?"));
    }

    #[test]
    fn test_render_empty_context() {
        let prompt = render_prompt("", "anything?").unwrap();
        assert!(prompt.contains("Question: anything?"));
    }
}
