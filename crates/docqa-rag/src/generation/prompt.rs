//! Prompt templates for grounded answer generation

use crate::types::RetrievalResult;

/// Reply the model must give when the context does not cover the question
pub const INSUFFICIENT_INFORMATION: &str =
    "I don't have enough information to answer that question.";

/// Fixed system instruction for every chat request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer the user's question based ONLY on the \
provided context. Give a detailed and complete answer. If the context does not contain the answer, say \
'I don't have enough information to answer that question.'";

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Number passages in relevance order: `[1] ...`, `[2] ...`
    pub fn build_context(results: &[RetrievalResult]) -> String {
        results
            .iter()
            .enumerate()
            .map(|(i, result)| format!("[{}] {}", i + 1, result.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// User turn: numbered context followed by the question
    pub fn build_rag_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Use the following pieces of context to answer the question. Provide a detailed answer in 3-5 sentences minimum.

Context:
{context}

Question: {question}

Detailed Answer:"#,
            context = context,
            question = question
        )
    }
}
