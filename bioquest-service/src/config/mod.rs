use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default number of prior turns forwarded to the chat-completion service.
const DEFAULT_CHAT_HISTORY_LIMIT: usize = 4;

/// Default per-call timeout for every third-party request.
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://your-project-name.vercel.app";

#[derive(Debug, Clone)]
pub struct BioquestConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub unsplash: UnsplashConfig,
    pub youtube: YoutubeConfig,
    pub cors: CorsConfig,
    pub chat: ChatConfig,
    pub upstream: UpstreamConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    /// e.g. https://api.openai.com/v1
    pub base_url: String,
    pub chat_model: String,
}

#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    pub access_key: Secret<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct YoutubeConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Both chat endpoints keep only the most recent `history_limit` entries.
    pub history_limit: usize,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl BioquestConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        // Keys may be blank outside prod; the providers then report themselves
        // as not configured instead of failing startup.
        Ok(BioquestConfig {
            common: common_config,
            openai: OpenAiConfig {
                api_key: Secret::new(get_env("OPENAI_API_KEY", Some(""), is_prod)?),
                base_url: get_env(
                    "OPENAI_BASE_URL",
                    Some("https://api.openai.com/v1"),
                    is_prod,
                )?,
                chat_model: get_env("OPENAI_CHAT_MODEL", Some("gpt-3.5-turbo"), is_prod)?,
            },
            unsplash: UnsplashConfig {
                access_key: Secret::new(get_env("UNSPLASH_ACCESS_KEY", Some(""), is_prod)?),
                base_url: get_env(
                    "UNSPLASH_BASE_URL",
                    Some("https://api.unsplash.com"),
                    is_prod,
                )?,
            },
            youtube: YoutubeConfig {
                api_key: Secret::new(get_env("YOUTUBE_API_KEY", Some(""), is_prod)?),
                base_url: get_env(
                    "YOUTUBE_BASE_URL",
                    Some("https://www.googleapis.com/youtube/v3"),
                    is_prod,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: split_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some(DEFAULT_CORS_ORIGINS),
                    is_prod,
                )?),
            },
            chat: ChatConfig {
                history_limit: optional_env("CHAT_HISTORY_LIMIT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CHAT_HISTORY_LIMIT),
            },
            upstream: UpstreamConfig {
                timeout_secs: optional_env("UPSTREAM_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            },
            observability: ObservabilityConfig {
                log_level: optional_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            },
        })
    }
}

pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_origins_trims_and_drops_blanks() {
        let origins = split_origins(" http://localhost:3000/ ,, https://app.example.com");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string()
            ]
        );
    }

    #[test]
    fn default_origins_are_the_two_frontends() {
        assert_eq!(split_origins(DEFAULT_CORS_ORIGINS).len(), 2);
    }

    #[test]
    fn get_env_uses_default_outside_prod() {
        let value = get_env("BIOQUEST_TEST_UNSET_VARIABLE", Some("fallback"), false)
            .expect("default applies");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_is_strict_in_prod() {
        let err = get_env("BIOQUEST_TEST_UNSET_VARIABLE", Some("fallback"), true)
            .expect_err("prod requires the variable");
        assert!(err.to_string().contains("required in production"));
    }
}
