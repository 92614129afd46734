/// Default Gemini model.
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
/// Default Perplexity model.
const DEFAULT_PERPLEXITY_MODEL: &str = "sonar";
/// Default outbound timeout for provider calls, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Provider credentials and models.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub perplexity_api_key: Option<String>,
    pub perplexity_model: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            perplexity_api_key: None,
            perplexity_model: DEFAULT_PERPLEXITY_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AiConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var              | Default            |
    /// |----------------------|--------------------|
    /// | `GEMINI_API_KEY`     | unset (disabled)   |
    /// | `GEMINI_MODEL`       | `gemini-1.5-flash` |
    /// | `PERPLEXITY_API_KEY` | unset (disabled)   |
    /// | `PERPLEXITY_MODEL`   | `sonar`            |
    /// | `AI_TIMEOUT_SECS`    | `60`               |
    ///
    /// Blank keys count as unset.
    pub fn from_env() -> Self {
        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        Self {
            gemini_api_key: non_blank_var("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into()),
            perplexity_api_key: non_blank_var("PERPLEXITY_API_KEY"),
            perplexity_model: std::env::var("PERPLEXITY_MODEL")
                .unwrap_or_else(|_| DEFAULT_PERPLEXITY_MODEL.into()),
            timeout_secs,
        }
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
