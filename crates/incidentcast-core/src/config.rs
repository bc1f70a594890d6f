//! Configuration module
//!
//! Configuration is read from environment variables (optionally via a `.env`
//! file loaded by the binary). The Amplitude API key is required; everything
//! else has a sensible default.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;
const DEFAULT_AMPLITUDE_ENDPOINT: &str = "https://api2.amplitude.com";
const DEFAULT_AMPLITUDE_TIMEOUT_SECS: u64 = 10;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    environment: String,
    cors_origins: Vec<String>,
    max_upload_size_bytes: usize,
    amplitude_api_key: String,
    amplitude_endpoint: String,
    amplitude_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            amplitude_api_key: env::var("AMPLITUDE_API_KEY")
                .map_err(|_| anyhow::anyhow!("AMPLITUDE_API_KEY must be set"))?,
            amplitude_endpoint: env::var("AMPLITUDE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_AMPLITUDE_ENDPOINT.to_string()),
            amplitude_timeout_seconds: env::var("AMPLITUDE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_AMPLITUDE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_AMPLITUDE_TIMEOUT_SECS),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn amplitude_api_key(&self) -> &str {
        &self.amplitude_api_key
    }

    pub fn amplitude_endpoint(&self) -> &str {
        &self.amplitude_endpoint
    }

    pub fn amplitude_timeout_seconds(&self) -> u64 {
        self.amplitude_timeout_seconds
    }

    /// Build a configuration directly, bypassing the environment. Intended
    /// for tests and embedding.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        server_port: u16,
        environment: impl Into<String>,
        cors_origins: Vec<String>,
        max_upload_size_bytes: usize,
        amplitude_api_key: impl Into<String>,
        amplitude_endpoint: impl Into<String>,
        amplitude_timeout_seconds: u64,
    ) -> Self {
        Config {
            server_port,
            environment: environment.into(),
            cors_origins,
            max_upload_size_bytes,
            amplitude_api_key: amplitude_api_key.into(),
            amplitude_endpoint: amplitude_endpoint.into(),
            amplitude_timeout_seconds,
        }
    }
}
