use aws_sdk_bedrockruntime::Client;

use crate::error::BedrockError;

/// Load shared AWS configuration for a region. Credentials come from the
/// default provider chain.
pub async fn load_config(region: &str) -> Result<aws_config::SdkConfig, BedrockError> {
    let region = region.trim();
    if region.is_empty() {
        return Err(BedrockError::Config("no AWS region configured".to_string()));
    }
    Ok(aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await)
}

/// Build a Bedrock Runtime client with a specific region.
pub async fn build_client(region: &str) -> Result<Client, BedrockError> {
    Ok(Client::new(&load_config(region).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_region_is_a_config_error() {
        let err = build_client("  ").await.unwrap_err();
        assert!(matches!(err, BedrockError::Config(_)));
        assert_eq!(err.to_string(), "AWS config error: no AWS region configured");
    }
}
