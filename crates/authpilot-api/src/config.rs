use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use authpilot_core::models::guidelines::LetterGuidelines;
use authpilot_session::config::SessionConfig;

/// Current guidelines file version. Bump this when adding fields or changing
/// shape. Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub model_id: String,
    pub region: String,
    /// Draft letters with Bedrock before falling back to the local template.
    pub remote_generation: bool,
    pub guidelines_path: Option<PathBuf>,
    pub session: SessionConfig,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_addr = lookup("AUTHPILOT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| eyre::eyre!("invalid AUTHPILOT_BIND_ADDR {bind_addr:?}: {e}"))?;

        let remote_generation = match lookup("AUTHPILOT_REMOTE_GENERATION") {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "" | "0" | "false" | "no" => false,
                other => {
                    return Err(eyre::eyre!(
                        "invalid AUTHPILOT_REMOTE_GENERATION {other:?}: expected true or false"
                    ));
                }
            },
        };

        Ok(Self {
            bind_addr,
            model_id: lookup("AUTHPILOT_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            remote_generation,
            guidelines_path: lookup("AUTHPILOT_GUIDELINES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            session: SessionConfig::default(),
        })
    }

    /// The configured guidelines file, or the built-in defaults.
    pub fn load_guidelines(&self) -> eyre::Result<LetterGuidelines> {
        match &self.guidelines_path {
            Some(path) => load_guidelines(path),
            None => Ok(LetterGuidelines::default()),
        }
    }
}

pub fn load_guidelines(path: &Path) -> eyre::Result<LetterGuidelines> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read guidelines at {}: {e}", path.display()))?;
    let guidelines = parse_guidelines(&contents)?;
    tracing::info!(path = %path.display(), "loaded letter guidelines");
    Ok(guidelines)
}

fn parse_guidelines(contents: &str) -> eyre::Result<LetterGuidelines> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("config_version") {
        None => 0,
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| eyre::eyre!("invalid guidelines config_version {value}"))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    Ok(serde_json::from_value(migrated)?)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "guidelines config_version {from_version} is newer than this build supports \
             ({CURRENT_VERSION}). Please update AuthPilot."
        ));
    }

    // v0 → v1: add custom_instructions
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("guidelines file is not a JSON object"))?;
        obj.entry("custom_instructions")
            .or_insert(serde_json::Value::String(String::new()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated guidelines v0 → v1 (added custom_instructions)");
    }

    Ok(json)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.region, "us-east-1");
        assert!(!config.remote_generation);
        assert!(config.guidelines_path.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("AUTHPILOT_BIND_ADDR", "0.0.0.0:9000"),
            ("AUTHPILOT_REMOTE_GENERATION", "TRUE"),
            ("AWS_REGION", "us-west-2"),
            ("AUTHPILOT_GUIDELINES_PATH", "/etc/authpilot/guidelines.json"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert!(config.remote_generation);
        assert_eq!(config.region, "us-west-2");
        assert_eq!(
            config.guidelines_path,
            Some(PathBuf::from("/etc/authpilot/guidelines.json"))
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(config_from(&[("AUTHPILOT_BIND_ADDR", "localhost")]).is_err());
        assert!(config_from(&[("AUTHPILOT_REMOTE_GENERATION", "maybe")]).is_err());
    }

    #[test]
    fn unversioned_guidelines_gain_custom_instructions() {
        let guidelines = parse_guidelines(
            r#"{
                "requirements": "Be brief.",
                "payer_rules": "Cite policy numbers.",
                "clinical_guidelines": "ACR criteria.",
                "documentation_standards": "List every enclosure."
            }"#,
        )
        .unwrap();
        assert_eq!(guidelines.requirements, "Be brief.");
        assert_eq!(guidelines.custom_instructions, "");
    }

    #[test]
    fn current_guidelines_keep_custom_instructions() {
        let guidelines = parse_guidelines(
            r#"{
                "config_version": 1,
                "requirements": "Be brief.",
                "payer_rules": "",
                "clinical_guidelines": "",
                "documentation_standards": "",
                "custom_instructions": "Sign as Dr. Chen."
            }"#,
        )
        .unwrap();
        assert_eq!(guidelines.custom_instructions, "Sign as Dr. Chen.");
    }

    #[test]
    fn newer_guidelines_are_rejected() {
        let err = parse_guidelines(r#"{ "config_version": 2 }"#).unwrap_err();
        assert!(err.to_string().contains("newer than this build supports"));
    }

    #[test]
    fn out_of_range_versions_are_rejected() {
        let err = parse_guidelines(r#"{ "config_version": 4294967297 }"#).unwrap_err();
        assert!(err.to_string().contains("invalid guidelines config_version"));
        assert!(parse_guidelines(r#"{ "config_version": -1 }"#).is_err());
        assert!(parse_guidelines(r#"{ "config_version": "1" }"#).is_err());
    }
}
