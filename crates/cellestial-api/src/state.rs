//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the provider clients, redirect URLs and server configuration.

use crate::logging::LogFormat;
use anyhow::{anyhow, bail, Context};
use axum::http::HeaderValue;
use cellestial_cloudinary::CloudinaryUploadStrategy;
use cellestial_core::{BoxedMediaStrategy, BoxedPaymentStrategy, CheckoutUrls};
use cellestial_stripe::StripeCheckoutStrategy;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["https://cellestial-frontend.vercel.app", "http://localhost:5173"];

/// Load `ENV_FILE` if set, otherwise `.env` from the working directory if present
pub fn load_env_file() -> anyhow::Result<()> {
    let env_file = std::env::var("ENV_FILE").ok().filter(|path| !path.is_empty());
    load_env_file_from(env_file.as_deref().map(Path::new))
}

/// Load variables from `path`, or from `.env` if present when `path` is `None`.
/// Variables already set in the process are not overridden.
pub fn load_env_file_from(path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    Ok(())
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Storefront base URL for checkout redirects
    pub frontend_url: String,
    /// Origins allowed by CORS (`*` allows any origin)
    pub allowed_origins: Vec<String>,
    /// Whether CORS responses allow credentials
    pub allow_credentials: bool,
    /// Directory uploads are staged in before being forwarded
    pub upload_dir: PathBuf,
    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {}", p))?,
            None => defaults.port,
        };

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(|o| o.trim_end_matches('/').to_string())
                .collect(),
            None => defaults.allowed_origins,
        };

        let allow_credentials = match get("CORS_ALLOW_CREDENTIALS") {
            Some(flag) => parse_bool(&flag)
                .ok_or_else(|| anyhow!("Invalid CORS_ALLOW_CREDENTIALS: {}", flag))?,
            None => defaults.allow_credentials,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(n) => n
                .trim()
                .parse()
                .with_context(|| format!("Invalid MAX_UPLOAD_BYTES: {}", n))?,
            None => defaults.max_upload_bytes,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(f) => f.parse()?,
            None => defaults.log_format,
        };

        let config = Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            frontend_url: get("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            allowed_origins,
            allow_credentials,
            upload_dir: get("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir),
            max_upload_bytes,
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for origin in &self.allowed_origins {
            if origin == "*" {
                if self.allow_credentials {
                    bail!("ALLOWED_ORIGINS=* cannot be combined with CORS_ALLOW_CREDENTIALS=true");
                }
                continue;
            }
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: {}", origin))?;
        }
        Ok(())
    }

    /// Address string used in logs
    pub fn display_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            frontend_url: "http://localhost:5173".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            allow_credentials: true,
            upload_dir: PathBuf::from("/tmp/uploads"),
            max_upload_bytes: 10 * 1024 * 1024,
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Hosted-checkout provider
    pub payments: BoxedPaymentStrategy,
    /// Media storage provider
    pub media: BoxedMediaStrategy,
    /// Checkout redirect URLs
    pub urls: CheckoutUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Assemble state from explicit provider clients
    pub fn new(
        config: AppConfig,
        payments: BoxedPaymentStrategy,
        media: BoxedMediaStrategy,
    ) -> Self {
        let urls = CheckoutUrls::new(&config.frontend_url);
        Self {
            payments,
            media,
            urls,
            config,
        }
    }

    /// Create state with the Stripe and Cloudinary clients configured from the environment
    pub fn from_env(config: AppConfig) -> anyhow::Result<Self> {
        let stripe = StripeCheckoutStrategy::from_env()
            .map_err(|e| anyhow!("Failed to initialize Stripe: {}", e))?;
        let cloudinary = CloudinaryUploadStrategy::from_env()
            .map_err(|e| anyhow!("Failed to initialize Cloudinary: {}", e))?;

        Ok(Self::new(
            config,
            Arc::new(stripe) as BoxedPaymentStrategy,
            Arc::new(cloudinary) as BoxedMediaStrategy,
        ))
    }
}
