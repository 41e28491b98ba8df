/// Configuration management for the community hub access layer
///
/// Loads configuration from environment variables (and a `.env` file when present).
use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

/// Main configuration
#[derive(Debug)]
pub struct Config {
    pub app: AppConfig,
    /// Document store (Firestore) settings
    pub firestore: FirestoreConfig,
    /// Generic REST backend serving `/users/{id}`
    pub api: ApiConfig,
    /// Local proxy route serving `/api/followers`
    pub followers: FollowersProxyConfig,
    /// Shared HTTP client settings
    pub http: HttpConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
}

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    pub base_url: String,
    /// OAuth bearer token; requests go out unauthenticated when unset
    pub token: Option<Arc<SecretString>>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<Arc<SecretString>>,
}

#[derive(Debug, Clone)]
pub struct FollowersProxyConfig {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
}

// Default values
const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";
const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_FOLLOWERS_PROXY_URL: &str = "http://localhost:3000";

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(default_timeout_secs()),
            user_agent: format!("community-hub/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Build the reqwest client shared by the store and REST clients
    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let secret = |key: &str| {
            lookup(key)
                .filter(|s| !s.is_empty())
                .map(|s| Arc::new(SecretString::from(s)))
        };

        let app = AppConfig {
            env: var("APP_ENV", "development"),
        };

        let firestore = FirestoreConfig {
            project_id: lookup("FIRESTORE_PROJECT_ID")
                .filter(|s| !s.is_empty())
                .context("FIRESTORE_PROJECT_ID environment variable not set")?,
            database: var("FIRESTORE_DATABASE", DEFAULT_FIRESTORE_DATABASE),
            base_url: var("FIRESTORE_BASE_URL", DEFAULT_FIRESTORE_BASE_URL),
            token: secret("FIRESTORE_TOKEN"),
        };

        let api = ApiConfig {
            base_url: var("API_BASE_URL", DEFAULT_API_BASE_URL),
            token: secret("API_TOKEN"),
        };

        let followers = FollowersProxyConfig {
            base_url: var("FOLLOWERS_PROXY_URL", DEFAULT_FOLLOWERS_PROXY_URL),
        };

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))?,
            None => default_timeout_secs(),
        };
        let http = HttpConfig {
            timeout: Duration::from_secs(timeout_secs),
            ..HttpConfig::default()
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("Unknown LOG_FORMAT: {}", other),
        };
        let observability = ObservabilityConfig {
            log_level: var("LOG_LEVEL", "info"),
            log_format,
        };

        Ok(Config {
            app,
            firestore,
            api,
            followers,
            http,
            observability,
        })
    }
}
