use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except provider credentials have defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    ///
    /// Must exceed the generation poll budget (30s) or every slow
    /// generation gets cut off by the HTTP layer instead of surfacing
    /// the typed timeout error.
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// External provider credentials and endpoints.
    pub providers: ProviderConfig,
}

/// Credentials and endpoints for the external services the pipeline
/// talks to. All optional at load time: a missing credential surfaces as
/// an `UNCONFIGURED` error when the corresponding feature is used, so a
/// deployment without e.g. prompt generation still serves everything else.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Image job service API token (`REPLICATE_API_TOKEN`).
    pub replicate_token: Option<String>,
    /// Completion service API key (`OPENAI_API_KEY`).
    pub openai_key: Option<String>,
    /// Blob store base URL (`BLOB_STORE_URL`).
    pub blob_url: Option<String>,
    /// Blob store write token (`BLOB_STORE_TOKEN`).
    pub blob_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                       |
    /// | `REPLICATE_API_TOKEN`  | unset                      |
    /// | `OPENAI_API_KEY`       | unset                      |
    /// | `BLOB_STORE_URL`       | unset                      |
    /// | `BLOB_STORE_TOKEN`     | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let providers = ProviderConfig {
            replicate_token: env_opt("REPLICATE_API_TOKEN"),
            openai_key: env_opt("OPENAI_API_KEY"),
            blob_url: env_opt("BLOB_STORE_URL"),
            blob_token: env_opt("BLOB_STORE_TOKEN"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            providers,
        }
    }
}

/// Read an env var, treating unset and empty identically.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
