use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Standing instructions sent with every remote letter-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LetterGuidelines {
    pub requirements: String,
    pub payer_rules: String,
    pub clinical_guidelines: String,
    pub documentation_standards: String,
    #[serde(default)]
    pub custom_instructions: String,
}

impl Default for LetterGuidelines {
    fn default() -> Self {
        Self {
            requirements: "Generate a comprehensive prior authorization letter for a medical \
                procedure. The letter should be professional, concise, and clearly articulate \
                the medical necessity."
                .to_string(),
            payer_rules: "Adhere strictly to standard payer policies for imaging and surgical \
                procedures, emphasizing conservative treatment failure and objective findings."
                .to_string(),
            clinical_guidelines: "Reference relevant clinical guidelines for the diagnosis and \
                procedure, ensuring all medical necessity criteria are met."
                .to_string(),
            documentation_standards: "Ensure all documentation is complete, accurate, and \
                includes patient demographics, diagnosis, procedure, treatment history, and \
                clinical findings."
                .to_string(),
            custom_instructions: String::new(),
        }
    }
}

impl LetterGuidelines {
    /// Render as the fixed guideline document of a generation request.
    /// Blank sections are skipped.
    pub fn to_document(&self) -> String {
        let sections = [
            ("Requirements", &self.requirements),
            ("Payer Rules", &self.payer_rules),
            ("Clinical Guidelines", &self.clinical_guidelines),
            ("Documentation Standards", &self.documentation_standards),
            ("Custom Instructions", &self.custom_instructions),
        ];

        let mut doc = String::new();
        for (title, body) in sections {
            if body.trim().is_empty() {
                continue;
            }
            doc.push_str(&format!("## {title}\n{}\n\n", body.trim()));
        }
        doc.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_skips_blank_custom_instructions() {
        let doc = LetterGuidelines::default().to_document();
        assert!(doc.starts_with("## Requirements"));
        assert!(doc.contains("## Documentation Standards"));
        assert!(!doc.contains("Custom Instructions"));
    }

    #[test]
    fn document_includes_custom_instructions_when_set() {
        let guidelines = LetterGuidelines {
            custom_instructions: "Cite ACR appropriateness criteria.".to_string(),
            ..Default::default()
        };
        assert!(guidelines.to_document().ends_with("Cite ACR appropriateness criteria."));
    }
}
