//! Model settings from the environment and an optional secrets file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::llm::{LlmSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

/// Secrets file looked up when `--secrets` is not given
pub const DEFAULT_SECRETS_PATH: &str = "secrets.toml";

/// Keys accepted in the secrets file, same names as the environment variables
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
struct SecretsFile {
    #[serde(rename = "GOOGLE_API_KEY")]
    api_key: Option<String>,

    #[serde(rename = "GEMINI_MODEL")]
    model: Option<String>,

    #[serde(rename = "GEMINI_BASE_URL")]
    base_url: Option<String>,
}

/// Load model settings.
///
/// A `.env` file is loaded first if present. Environment variables win over
/// the secrets file; a missing secrets file is not an error. A missing API key
/// is left as `None` for the caller to decide on.
pub fn load_settings(secrets_path: &Path) -> Result<LlmSettings> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let secrets = read_secrets(secrets_path)?;
    Ok(resolve(|name| std::env::var(name).ok(), secrets))
}

fn read_secrets(path: &Path) -> Result<SecretsFile> {
    if !path.exists() {
        return Ok(SecretsFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read secrets file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse secrets file: {}", path.display()))
}

fn resolve(env: impl Fn(&str) -> Option<String>, secrets: SecretsFile) -> LlmSettings {
    let pick = |name: &str, from_file: Option<String>| {
        env(name)
            .filter(|v| !v.trim().is_empty())
            .or(from_file.filter(|v| !v.trim().is_empty()))
    };

    LlmSettings {
        api_key: pick(API_KEY_VAR, secrets.api_key),
        model: pick(MODEL_VAR, secrets.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        base_url: pick(BASE_URL_VAR, secrets.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    }
}
