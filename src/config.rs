use crate::error::{Error, Result};
use crate::models::translation::Language;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub token_ttl_hours: i64,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: String,
    pub notify_timeout_secs: u64,
    pub public_rps: u32,
    pub trust_proxy_headers: bool,
    pub media_root: String,
    pub primary_language: Language,
    pub page_size: i64,
    pub view_hits_per_ip_limit: i64,
    pub view_hit_window_days: i64,
    pub cache_enabled: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let primary_language = get_env_or("PRIMARY_LANGUAGE", "uz");
        let primary_language = Language::from_code(&primary_language).ok_or_else(|| {
            Error::Config(format!("Unsupported PRIMARY_LANGUAGE: {}", primary_language))
        })?;

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            admin_username: get_env("ADMIN_USERNAME")?,
            admin_password_hash: get_env("ADMIN_PASSWORD_HASH")?,
            token_ttl_hours: get_env_parse_or("TOKEN_TTL_HOURS", 12)?,
            telegram_bot_token: get_env_opt("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: get_env_opt("TELEGRAM_CHAT_ID"),
            telegram_api_base: get_env_or("TELEGRAM_API_BASE", "https://api.telegram.org"),
            notify_timeout_secs: get_env_parse_or("NOTIFY_TIMEOUT_SECS", 10)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
            trust_proxy_headers: get_env_parse_or("TRUST_PROXY_HEADERS", false)?,
            media_root: get_env_or("MEDIA_ROOT", "./media"),
            primary_language,
            page_size: get_env_parse_or("PAGE_SIZE", 10)?,
            view_hits_per_ip_limit: get_env_parse_or("VIEW_HITS_PER_IP_LIMIT", 0)?,
            view_hit_window_days: get_env_parse_or("VIEW_HIT_WINDOW_DAYS", 7)?,
            cache_enabled: get_env_parse_or("CACHE_ENABLED", true)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
