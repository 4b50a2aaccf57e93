//! Environment Configuration
//!
//! Reads and validates the server configuration from environment variables
//! (a `.env` file is honored via dotenvy in main). All options have
//! development defaults except the LLM API key, which is only required for
//! real interviews.

use std::env;

use buildbrief_llm::ProviderConfig;
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Runtime environment; toggles internal error detail exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port (PORT, default 3000).
    pub port: u16,
    /// Allowed CORS origins (ALLOWED_ORIGINS, comma-separated).
    pub allowed_origins: Vec<String>,
    /// Environment name (APP_ENV, default development).
    pub environment: Environment,
    /// LLM provider settings (OPENROUTER_API_KEY, LLM_MODEL,
    /// LLM_TIMEOUT_SECS, SITE_URL).
    pub llm: ProviderConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::internal(format!("Invalid PORT value: {}", raw)))?,
            Err(_) => 3000,
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:3000".to_string(),
                ]
            });

        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::internal(format!("Invalid LLM_TIMEOUT_SECS value: {}", raw))
            })?,
            Err(_) => 60,
        };

        let defaults = ProviderConfig::default();
        let llm = ProviderConfig {
            api_key: env::var("OPENROUTER_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
            base_url: env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs,
            site_url: env::var("SITE_URL").ok(),
        };

        Ok(Self {
            port,
            allowed_origins,
            environment,
            llm,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            environment: Environment::Development,
            llm: ProviderConfig::default(),
        }
    }
}
