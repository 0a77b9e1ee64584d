use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::{info, warn};
use uuid::Uuid;

use authpilot_core::models::appeal::AppealDraft;
use authpilot_core::models::guidelines::LetterGuidelines;
use authpilot_core::models::letter::LetterKind;
use authpilot_core::models::snapshot::FormSnapshot;
use authpilot_core::models::usage::TokenUsage;

use crate::context::{ContextDocument, build_system_prompt};
use crate::error::BedrockError;
use crate::tokens;

/// What the letter is about.
#[derive(Debug, Clone, Copy)]
pub enum LetterSubject<'a> {
    Authorization(&'a FormSnapshot),
    Appeal(&'a AppealDraft),
}

impl LetterSubject<'_> {
    pub fn kind(&self) -> LetterKind {
        match self {
            Self::Authorization(_) => LetterKind::Authorization,
            Self::Appeal(_) => LetterKind::Appeal,
        }
    }
}

/// Everything sent with one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub subject: LetterSubject<'a>,
    pub guidelines: &'a LetterGuidelines,
    pub context: &'a [ContextDocument],
}

/// A drafted letter and what it cost.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub request_id: Uuid,
    pub model_id: String,
    pub text: String,
    pub usage: TokenUsage,
}

/// Draft a letter with a Bedrock model.
///
/// The system prompt carries the guidelines and any uploaded context; the
/// user message carries the request data. A response without letter text is
/// an error, never an empty letter.
pub async fn generate_letter_text(
    client: &Client,
    model_id: &str,
    request: &GenerationRequest<'_>,
) -> Result<GenerationOutput, BedrockError> {
    if model_id.trim().is_empty() {
        return Err(BedrockError::Config("no model id configured".to_string()));
    }
    let request_id = Uuid::new_v4();
    let kind = request.subject.kind();
    info!(request_id = %request_id, model = model_id, ?kind, "starting letter generation");

    let system_prompt = build_system_prompt(request.guidelines, request.context);
    let user_message = build_user_message(&request.subject);

    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt))
        .messages(
            Message::builder()
                .role(ConversationRole::User)
                .content(ContentBlock::Text(user_message))
                .build()
                .map_err(|e| BedrockError::Invocation(e.to_string()))?,
        )
        .send()
        .await
        .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

    let text = output_message
        .content()
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim().to_string();

    if text.is_empty() {
        warn!(request_id = %request_id, model = model_id, "model returned no letter text");
        return Err(BedrockError::EmptyResponse);
    }

    let usage = tokens::usage_for(model_id, tokens::token_count(response.usage()));
    info!(
        request_id = %request_id,
        input_tokens = usage.tokens.input,
        output_tokens = usage.tokens.output,
        total_tokens = usage.tokens.total(),
        cost_usd = usage.cost_usd,
        "letter generation complete"
    );

    Ok(GenerationOutput {
        request_id,
        model_id: model_id.to_string(),
        text,
        usage,
    })
}

/// Render the request data as labelled lines for the model.
pub fn build_user_message(subject: &LetterSubject<'_>) -> String {
    match subject {
        LetterSubject::Authorization(snapshot) => authorization_message(snapshot),
        LetterSubject::Appeal(draft) => appeal_message(draft),
    }
}

fn authorization_message(snapshot: &FormSnapshot) -> String {
    let mut out = String::from("Draft a prior authorization request letter.\n\n## Request\n");
    let values = snapshot.filled_values();
    if values.is_empty() {
        out.push_str("No request details were provided.\n");
    }
    for (field, value) in values {
        out.push_str(&format!("- {}: {value}\n", field.label()));
    }
    out
}

fn appeal_message(draft: &AppealDraft) -> String {
    let case = &draft.case;
    let mut out = String::from("Draft an appeal letter for a denied prior authorization.\n\n");

    out.push_str("## Denied case\n");
    out.push_str(&format!("- Case ID: {}\n", case.id));
    out.push_str(&format!("- Patient: {}\n", case.patient));
    out.push_str(&format!("- Procedure: {}\n", case.procedure));
    out.push_str(&format!("- Insurer: {}\n", case.insurance));
    out.push_str(&format!("- Denied on: {}\n", case.denial_date));
    out.push_str(&format!("- Stated reason: {}\n", case.denial_reason));

    if let Some(analysis) = &case.analysis {
        out.push_str(&format!("- What the denial means: {}\n", analysis.real_meaning));
        if let Some(policy) = &analysis.policy_violation {
            out.push_str(&format!("- Policy cited: {policy}\n"));
        }
    }

    let completed: Vec<_> = draft.completed_items().collect();
    if !completed.is_empty() {
        out.push_str("\n## Supporting documentation gathered\n");
        for item in completed {
            out.push_str(&format!("- {}", item.label));
            if !item.notes().trim().is_empty() {
                out.push_str(&format!(": {}", item.notes().trim()));
            }
            out.push('\n');
        }
    }

    if !draft.additional_comments.trim().is_empty() {
        out.push_str("\n## Additional clinical context\n");
        out.push_str(draft.additional_comments.trim());
        out.push('\n');
    }

    let attachments = draft.attachment_names();
    if !attachments.is_empty() {
        out.push_str("\n## Attached documents\n");
        for name in attachments {
            out.push_str(&format!("- {name}\n"));
        }
    }

    for (label, value) in [("Provider", &draft.provider_name), ("NPI", &draft.npi)] {
        if !value.trim().is_empty() {
            out.push_str(&format!("\n{label}: {}", value.trim()));
        }
    }

    out
}
