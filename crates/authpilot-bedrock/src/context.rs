//! Prompt context for remote letter drafting.
//!
//! The system prompt is the letter guidelines followed by an optional
//! record-context block holding text the user uploaded as background. Only
//! plain-text uploads carry content; other formats are never parsed.

use serde::{Deserialize, Serialize};

use authpilot_core::models::guidelines::LetterGuidelines;

const ROLE_PROMPT: &str = "\
You draft insurance letters for a healthcare provider's office. \
Write only the letter body as plain text, using short section headings that end in a colon \
and `- ` for bullet points. Do not invent clinical facts that are not in the request; \
when a detail is missing, phrase around it rather than leaving a placeholder.";

/// A context document with its text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextDocument {
    pub filename: String,
    pub text: String,
}

/// Build a structured context block from uploaded documents.
///
/// Returns an XML-style block for the system prompt, or an empty string when
/// there is nothing to include.
pub fn build_context_block(documents: &[ContextDocument]) -> String {
    let documents: Vec<_> = documents
        .iter()
        .filter(|d| !d.text.trim().is_empty())
        .collect();
    if documents.is_empty() {
        return String::new();
    }

    let mut block = String::from("<record_context>\n");
    for doc in documents {
        block.push_str(&format!("<document name=\"{}\">\n", doc.filename.replace('"', "'")));
        block.push_str(doc.text.trim_end());
        block.push_str("\n</document>\n");
    }
    block.push_str("</record_context>");
    block
}

/// Assemble the full system prompt for a generation call.
pub fn build_system_prompt(guidelines: &LetterGuidelines, documents: &[ContextDocument]) -> String {
    let mut prompt = format!("{ROLE_PROMPT}\n\n{}", guidelines.to_document());
    let block = build_context_block(documents);
    if !block.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(&block);
    }
    prompt
}
