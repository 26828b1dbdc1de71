use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HF_API_BASE: &str = "https://router.huggingface.co/hf-inference";
pub const DEFAULT_HF_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Which hosted model answers summarization calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineBackend {
    #[default]
    HuggingFace,
    OpenAi,
}

impl EngineBackend {
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            EngineBackend::HuggingFace => DEFAULT_HF_MODEL,
            EngineBackend::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }
}

impl FromStr for EngineBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(EngineBackend::HuggingFace),
            "openai" => Ok(EngineBackend::OpenAi),
            other => Err(format!(
                "unknown backend '{other}', expected 'huggingface' or 'openai'"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub backend: EngineBackend,
    pub model: Option<String>,
    pub request_timeout: Option<Duration>,
    pub hf_api_token: Option<String>,
    pub hf_api_base: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_api_base: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = match non_empty_var("SUMMARIZER_BACKEND") {
            Some(raw) => raw
                .parse::<EngineBackend>()
                .map_err(|e| format!("SUMMARIZER_BACKEND: {e}"))?,
            None => EngineBackend::default(),
        };

        let request_timeout = match non_empty_var("SUMMARIZER_TIMEOUT_SECS") {
            Some(raw) => Some(
                parse_timeout(&raw).map_err(|e| format!("SUMMARIZER_TIMEOUT_SECS: {e}"))?,
            ),
            None => None,
        };

        Ok(Self {
            backend,
            model: non_empty_var("SUMMARIZER_MODEL"),
            request_timeout,
            hf_api_token: non_empty_var("HF_API_TOKEN"),
            hf_api_base: non_empty_var("HF_API_BASE"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_org_id: non_empty_var("OPENAI_ORG_ID"),
            openai_api_base: non_empty_var("OPENAI_API_BASE"),
        })
    }

    /// Model identifier, falling back to the backend's default.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_timeout(raw: &str) -> Result<Duration, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(format!("invalid number '{raw}': {e}")),
    }
}
