// src/config.rs
use std::env;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_TTL_SECS: u64 = 1800;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Credential and model selection for one remote provider. A missing key
/// means the provider is disabled, not misconfigured.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Optional fire-and-forget analytics sink. Only active when both the
/// measurement id and the API secret are present.
#[derive(Clone, Debug, Default)]
pub struct AnalyticsConfig {
    pub measurement_id: Option<String>,
    pub api_secret: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub gemini: ProviderConfig,
    pub openai: ProviderConfig,
    pub admin_key: Option<String>,
    pub session_ttl: Duration,
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Read the whole configuration from the process environment once, at
    /// startup. Empty values count as unset.
    pub fn from_env() -> Self {
        let ttl_secs = env_var("SESSION_TTL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);

        Self {
            bind_addr: env_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            gemini: ProviderConfig {
                api_key: env_var("GEMINI_API_KEY"),
                model: env_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
            openai: ProviderConfig {
                api_key: env_var("OPENAI_API_KEY"),
                model: env_var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
            admin_key: env_var("ADMIN_KEY"),
            session_ttl: Duration::from_secs(ttl_secs),
            analytics: AnalyticsConfig {
                measurement_id: env_var("ANALYTICS_MEASUREMENT_ID"),
                api_secret: env_var("ANALYTICS_API_SECRET"),
            },
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
