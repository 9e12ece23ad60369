//! Configuration loading from environment.

use std::env;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Operator WhatsApp number for order notifications, if overridden.
    pub admin_phone: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Gateway/email/identity credentials are deliberately NOT read here:
    /// the adapters pick them up themselves and fail at first use, so the
    /// server can boot without them.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let admin_phone = env::var("ADMIN_WHATSAPP_NUMBER").ok();

        Ok(Self {
            port,
            database_url,
            admin_phone,
        })
    }
}
