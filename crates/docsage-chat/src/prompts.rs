//! Prompt assembly for grounded question answering.

pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: usize = 500;

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant that answers questions based on provided document excerpts.

Rules:
- Only use information from the provided sources
- If the sources don't contain enough information, say so clearly
- Cite which source(s) you're using (e.g., \"According to Source 1...\")
- Be concise but thorough
- If asked about something not in the sources, acknowledge the limitation";

/// Number each passage and label it with its file, separated by blank lines.
pub fn build_context<'a>(passages: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    passages
        .into_iter()
        .enumerate()
        .map(|(i, (filename, text))| format!("[Source {} - {}]: {}", i + 1, filename, text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_user_prompt(context: &str, question: &str) -> String {
    format!(
        "Context from documents:\n\n{}\n\nQuestion: {}\n\nPlease provide a clear, accurate answer based on the context above.",
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_numbered_from_one() {
        let ctx = build_context([("a.pdf", "first passage"), ("b.txt", "second passage")]);
        assert_eq!(
            ctx,
            "[Source 1 - a.pdf]: first passage\n\n[Source 2 - b.txt]: second passage"
        );
    }

    #[test]
    fn test_user_prompt_contains_context_and_question() {
        let prompt = build_user_prompt("[Source 1 - a.pdf]: x", "What is x?");
        assert!(prompt.starts_with("Context from documents:\n\n[Source 1 - a.pdf]: x"));
        assert!(prompt.contains("Question: What is x?"));
    }

    #[test]
    fn test_system_prompt_requires_citations() {
        assert!(SYSTEM_PROMPT.contains("Only use information from the provided sources"));
        assert!(SYSTEM_PROMPT.contains("Cite which source"));
    }
}
