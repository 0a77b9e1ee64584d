use authpilot_bedrock::context::{ContextDocument, build_context_block, build_system_prompt};
use authpilot_core::models::guidelines::LetterGuidelines;

#[test]
fn no_documents_returns_empty_block() {
    assert_eq!(build_context_block(&[]), "");
}

#[test]
fn blank_documents_are_skipped() {
    let docs = vec![ContextDocument {
        filename: "empty.txt".to_string(),
        text: "  \n".to_string(),
    }];
    assert_eq!(build_context_block(&docs), "");
}

#[test]
fn documents_are_wrapped_in_record_context() {
    let docs = vec![
        ContextDocument {
            filename: "policy.txt".to_string(),
            text: "Aetna CPB 0236 covers lumbar MRI after 6 weeks.\n".to_string(),
        },
        ContextDocument {
            filename: "history \"v2\".txt".to_string(),
            text: "Prior imaging unremarkable.".to_string(),
        },
    ];

    let block = build_context_block(&docs);
    assert!(block.starts_with("<record_context>\n<document name=\"policy.txt\">\n"));
    assert!(block.contains("Aetna CPB 0236 covers lumbar MRI after 6 weeks.\n</document>"));
    assert!(block.contains("<document name=\"history 'v2'.txt\">"));
    assert!(block.ends_with("</record_context>"));
}

#[test]
fn system_prompt_carries_guidelines_then_context() {
    let docs = vec![ContextDocument {
        filename: "policy.txt".to_string(),
        text: "Payer policy text.".to_string(),
    }];
    let prompt = build_system_prompt(&LetterGuidelines::default(), &docs);

    let guidelines_at = prompt.find("## Requirements").unwrap();
    let context_at = prompt.find("<record_context>").unwrap();
    assert!(guidelines_at < context_at);
    assert!(!build_system_prompt(&LetterGuidelines::default(), &[]).contains("record_context"));
}
