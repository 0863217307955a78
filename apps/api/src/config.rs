use anyhow::{Context, Result};

use crate::extraction::validation::DEFAULT_MAX_UPLOAD_BYTES;

/// Default shortlist threshold, in percent.
pub const DEFAULT_SHORTLIST_THRESHOLD: f64 = 20.0;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Scores at or above this are shortlisted.
    pub shortlist_threshold: f64,
    pub max_upload_bytes: usize,
    pub ocr_enabled: bool,
    pub tesseract_lang: String,
    /// `None` disables notifications.
    pub smtp: Option<SmtpSettings>,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender mailbox, e.g. `HR Team <hr@example.com>`.
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            shortlist_threshold: parse_env("SHORTLIST_THRESHOLD", DEFAULT_SHORTLIST_THRESHOLD)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            ocr_enabled: parse_env("OCR_ENABLED", true)?,
            tesseract_lang: optional_env("TESSERACT_LANG").unwrap_or_else(|| "eng".to_string()),
            smtp: smtp_from_env()?,
        })
    }
}

/// SMTP is configured only when both a host and a sender address are set.
fn smtp_from_env() -> Result<Option<SmtpSettings>> {
    let (Some(host), Some(from)) = (optional_env("SMTP_HOST"), optional_env("MAIL_FROM")) else {
        return Ok(None);
    };
    let port = optional_env("SMTP_PORT")
        .map(|p| p.parse::<u16>())
        .transpose()
        .context("SMTP_PORT must be a valid port number")?;

    Ok(Some(SmtpSettings {
        host,
        port,
        username: optional_env("SMTP_USERNAME"),
        password: optional_env("SMTP_PASSWORD"),
        from,
    }))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
