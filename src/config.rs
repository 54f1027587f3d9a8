use std::env;

use crate::screenshot::DEFAULT_ENDPOINT;

/// Runtime settings, read once at start-up from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Key used for storage uploads; falls back to the anon key.
    pub supabase_service_key: String,
    /// When set, access tokens are checked with this HS256 secret instead of JWKS.
    pub jwt_secret: Option<String>,
    pub screenshot_endpoint: String,
    pub screenshot_access_key: Option<String>,
    pub profile_image_bucket: String,
    pub portfolio_bucket: String,
    /// How many freelancers each "see more" reveals.
    pub page_size: usize,
    pub run_migrations: bool,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_key: String::new(),
            jwt_secret: None,
            screenshot_endpoint: DEFAULT_ENDPOINT.to_string(),
            screenshot_access_key: None,
            profile_image_bucket: "profile-images".to_string(),
            portfolio_bucket: "portfolio-screenshots".to_string(),
            page_size: 6,
            run_migrations: false,
            port: 8080,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
        let defaults = Self::default();

        let supabase_url = require("SUPABASE_URL")?.trim_end_matches('/').to_string();
        if !supabase_url.starts_with("https://") && !supabase_url.starts_with("http://") {
            return Err(ConfigError::Invalid {
                name: "SUPABASE_URL",
                value: supabase_url,
            });
        }
        let supabase_anon_key = require("SUPABASE_ANON_KEY")?;

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            supabase_service_key: get("SUPABASE_SERVICE_KEY")
                .unwrap_or_else(|| supabase_anon_key.clone()),
            supabase_url,
            supabase_anon_key,
            jwt_secret: get("SUPABASE_JWT_SECRET"),
            screenshot_endpoint: get("SCREENSHOT_ENDPOINT").unwrap_or(defaults.screenshot_endpoint),
            screenshot_access_key: get("SCREENSHOT_ACCESS_KEY"),
            profile_image_bucket: get("PROFILE_IMAGE_BUCKET")
                .unwrap_or(defaults.profile_image_bucket),
            portfolio_bucket: get("PORTFOLIO_BUCKET").unwrap_or(defaults.portfolio_bucket),
            page_size: parse_or(
                "FREELANCER_PAGE_SIZE",
                get("FREELANCER_PAGE_SIZE"),
                defaults.page_size,
            )?
            .max(1),
            run_migrations: parse_or("RUN_MIGRATIONS", get("RUN_MIGRATIONS"), false)?,
            port: parse_or("PORT", get("PORT"), defaults.port)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
