use authpilot_core::models::usage::{ModelPricing, TokenCount, TokenUsage};

/// Token counts from a Converse response. A missing usage block counts as
/// zero tokens.
pub fn token_count(usage: Option<&aws_sdk_bedrockruntime::types::TokenUsage>) -> TokenCount {
    usage
        .map(|u| TokenCount {
            input: u.input_tokens.max(0) as u64,
            output: u.output_tokens.max(0) as u64,
        })
        .unwrap_or_default()
}

/// Cost a token count for a model. Models without known pricing cost zero.
pub fn usage_for(model_id: &str, tokens: TokenCount) -> TokenUsage {
    TokenUsage {
        tokens,
        cost_usd: get_pricing(model_id)
            .map(|p| p.estimate_cost(tokens))
            .unwrap_or(0.0),
    }
}

/// Published on-demand pricing per million tokens, matched on the model
/// family inside the inference profile id.
pub fn get_pricing(model_id: &str) -> Option<ModelPricing> {
    let (input_per_million, output_per_million) = match model_id {
        id if id.contains("claude-opus-4") => (15.0, 75.0),
        id if id.contains("claude-sonnet-4") => (3.0, 15.0),
        id if id.contains("claude-3-7-sonnet") || id.contains("claude-3-5-sonnet") => (3.0, 15.0),
        id if id.contains("claude-3-5-haiku") => (0.80, 4.0),
        id if id.contains("claude-3-haiku") => (0.25, 1.25),
        _ => return None,
    };
    Some(ModelPricing {
        input_per_million,
        output_per_million,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sonnet_profile_is_priced() {
        let usage = usage_for(
            "us.anthropic.claude-sonnet-4-20250514-v1:0",
            TokenCount {
                input: 1_000_000,
                output: 100_000,
            },
        );
        assert!((usage.cost_usd - 4.5).abs() < 1e-9);
    }

    #[test]
    fn unknown_model_costs_nothing() {
        let tokens = TokenCount {
            input: 10,
            output: 10,
        };
        assert!(get_pricing("amazon.titan-text-express-v1").is_none());
        assert_eq!(usage_for("amazon.titan-text-express-v1", tokens).cost_usd, 0.0);
    }

    #[test]
    fn missing_usage_block_is_zero() {
        assert_eq!(token_count(None), TokenCount::default());
    }
}
