use std::env;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_KUMA_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub kuma_url: String,
    pub kuma_username: String,
    pub kuma_password: String,
    pub kuma_timeout_secs: u64,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            kuma_url: env::var("KUMA_URL")
                .unwrap_or_else(|_| {
                    warn!("KUMA_URL not set, using empty value");
                    String::new()
                }),
            kuma_username: env::var("KUMA_USERNAME").unwrap_or_default(),
            kuma_password: env::var("KUMA_PASSWORD").unwrap_or_default(),
            kuma_timeout_secs: match env::var("KUMA_TIMEOUT_SECS") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("KUMA_TIMEOUT_SECS is not a number ({}), using default", raw);
                    DEFAULT_KUMA_TIMEOUT_SECS
                }),
                Err(_) => DEFAULT_KUMA_TIMEOUT_SECS,
            },
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        };

        if config.kuma_username.is_empty() {
            warn!("KUMA_USERNAME not set, upstream calls will be made without a session token");
        }

        if !config.is_configured() {
            warn!("Gateway not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.kuma_url.is_empty() && !self.jwt_secret.is_empty()
    }

    pub fn has_kuma_credentials(&self) -> bool {
        !self.kuma_username.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kuma_url: String::new(),
            kuma_username: String::new(),
            kuma_password: String::new(),
            kuma_timeout_secs: DEFAULT_KUMA_TIMEOUT_SECS,
            jwt_secret: String::new(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}
