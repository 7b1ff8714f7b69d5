use anyhow::{Context, Result};
use secrecy::SecretString;

const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_OCR_REGION: &str = "ap-beijing";
const DEFAULT_OCR_ENDPOINT: &str = "https://ocr.tencentcloudapi.com";
const DEFAULT_QUESTION_COUNT: usize = 10;

/// Application configuration loaded from environment variables.
///
/// Credentials are optional at startup: a missing key is reported per request
/// as a configuration error instead of preventing the service from booting.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: Option<SecretString>,
    pub openrouter_base_url: String,
    pub llm_model: String,
    /// Overrides the per-style default when set.
    pub llm_max_tokens: Option<u32>,
    pub llm_temperature: f32,
    pub llm_timeout_secs: Option<u64>,
    pub tencent_secret_id: Option<SecretString>,
    pub tencent_secret_key: Option<SecretString>,
    pub tencent_ocr_region: String,
    /// GeneralBasicOCR endpoint; override to go through a relay.
    pub tencent_ocr_endpoint: String,
    /// Public URL of this deployment, used as the gateway referer fallback.
    pub deployment_url: Option<String>,
    pub question_count: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: optional_env("OPENROUTER_API_KEY")
                .or_else(|| optional_env("NEXT_PUBLIC_OPENROUTER_API_KEY"))
                .map(SecretString::new),
            openrouter_base_url: optional_env("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS")?,
            llm_temperature: parse_env("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS")?,
            tencent_secret_id: optional_env("TENCENT_SECRET_ID").map(SecretString::new),
            tencent_secret_key: optional_env("TENCENT_SECRET_KEY").map(SecretString::new),
            tencent_ocr_region: optional_env("TENCENT_OCR_REGION")
                .unwrap_or_else(|| DEFAULT_OCR_REGION.to_string()),
            tencent_ocr_endpoint: optional_env("TENCENT_OCR_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OCR_ENDPOINT.to_string()),
            deployment_url: optional_env("DEPLOYMENT_URL")
                .or_else(|| optional_env("VERCEL_URL").map(|host| format!("https://{host}"))),
            question_count: parse_env("INTERVIEW_QUESTION_COUNT")?
                .unwrap_or(DEFAULT_QUESTION_COUNT),
            port: parse_env("PORT")?.unwrap_or(8080),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has an invalid value"))
        })
        .transpose()
}

#[cfg(test)]
impl Config {
    /// Configuration used by router and client tests; never reads the environment.
    pub fn for_tests(openrouter_base_url: &str) -> Self {
        Config {
            openrouter_api_key: Some(SecretString::new("test-key".to_string())),
            openrouter_base_url: openrouter_base_url.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            llm_max_tokens: None,
            llm_temperature: DEFAULT_TEMPERATURE,
            llm_timeout_secs: Some(5),
            tencent_secret_id: None,
            tencent_secret_key: None,
            tencent_ocr_region: DEFAULT_OCR_REGION.to_string(),
            tencent_ocr_endpoint: DEFAULT_OCR_ENDPOINT.to_string(),
            deployment_url: None,
            question_count: DEFAULT_QUESTION_COUNT,
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
