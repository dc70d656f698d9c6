//! Server configuration loaded from the environment.
//!
//! Every variable has a default. Malformed numeric or boolean values fall
//! back to the default with a WARN; a malformed `CATALOGUE_TABLE` or
//! `SEARCH_FIELD_JOIN` aborts startup, since silently searching the wrong
//! table or with the wrong join would return misleading results.
//!
//! The classifier backend reads its own `OPENAI_*` variables
//! (see `toolfinder_inference::OpenAIConfig::from_env`).

use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use tracing::warn;

use toolfinder_core::{defaults, Error, FieldJoin, Result};
use toolfinder_db::validate_identifier;

/// Global rate limit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests: u32,
    pub period: Duration,
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub catalogue_table: String,
    pub host: String,
    pub port: u16,
    pub field_join: FieldJoin,
    pub max_results: Option<i64>,
    pub classifier_timeout: Duration,
    pub run_migrations: bool,
    /// `None` when rate limiting is disabled.
    pub rate_limit: Option<RateLimitConfig>,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_string(),
            db_max_connections: defaults::DB_MAX_CONNECTIONS,
            catalogue_table: defaults::CATALOGUE_TABLE.to_string(),
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            field_join: FieldJoin::default(),
            max_results: None,
            classifier_timeout: Duration::from_secs(defaults::CLASSIFIER_TIMEOUT_SECS),
            run_migrations: true,
            rate_limit: Some(RateLimitConfig {
                requests: defaults::RATE_LIMIT_REQUESTS as u32,
                period: Duration::from_secs(defaults::RATE_LIMIT_PERIOD_SECS),
            }),
            allowed_origins: parse_allowed_origins(defaults::ALLOWED_ORIGINS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        let env = Env { lookup: &lookup };

        let catalogue_table = env
            .string("CATALOGUE_TABLE")
            .unwrap_or(base.catalogue_table);
        validate_identifier(&catalogue_table)
            .map_err(|e| Error::Config(format!("CATALOGUE_TABLE: {}", e)))?;

        let field_join = match env.string("SEARCH_FIELD_JOIN") {
            Some(raw) => FieldJoin::from_str(&raw)
                .map_err(|e| Error::Config(format!("SEARCH_FIELD_JOIN: {}", e)))?,
            None => base.field_join,
        };

        let max_results = env
            .string("SEARCH_MAX_RESULTS")
            .and_then(|raw| match raw.parse::<i64>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    warn!(
                        subsystem = "api",
                        variable = "SEARCH_MAX_RESULTS",
                        value = %raw,
                        "Invalid row cap, returning all matches"
                    );
                    None
                }
            });

        let classifier_timeout = Duration::from_secs(
            env.positive("CLASSIFIER_TIMEOUT_SECS", defaults::CLASSIFIER_TIMEOUT_SECS),
        );

        let rate_limit = if env.flag("RATE_LIMIT_ENABLED", true) {
            let requests = env.positive("RATE_LIMIT_REQUESTS", defaults::RATE_LIMIT_REQUESTS);
            Some(RateLimitConfig {
                requests: u32::try_from(requests).unwrap_or(u32::MAX),
                period: Duration::from_secs(
                    env.positive("RATE_LIMIT_PERIOD_SECS", defaults::RATE_LIMIT_PERIOD_SECS),
                ),
            })
        } else {
            None
        };

        Ok(Self {
            database_url: env.string("DATABASE_URL").unwrap_or(base.database_url),
            db_max_connections: env
                .positive("DB_MAX_CONNECTIONS", u64::from(base.db_max_connections))
                .try_into()
                .unwrap_or(base.db_max_connections),
            catalogue_table,
            host: env.string("HOST").unwrap_or(base.host),
            port: env.parse("PORT", base.port),
            field_join,
            max_results,
            classifier_timeout,
            run_migrations: env.flag("RUN_MIGRATIONS", base.run_migrations),
            rate_limit,
            allowed_origins: env
                .string("ALLOWED_ORIGINS")
                .map(|raw| parse_allowed_origins(&raw))
                .unwrap_or(base.allowed_origins),
        })
    }

    /// `host:port` listen address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct Env<'a, F> {
    lookup: &'a F,
}

impl<F> Env<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed, non-empty value.
    fn string(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + std::fmt::Display + Copy,
    {
        match self.string(key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    subsystem = "api",
                    variable = key,
                    value = %raw,
                    default = %default,
                    "Invalid value, using default"
                );
                default
            }),
            None => default,
        }
    }

    fn positive(&self, key: &str, default: u64) -> u64 {
        match self.parse(key, default) {
            0 => {
                warn!(subsystem = "api", variable = key, default, "Zero is not allowed, using default");
                default
            }
            n => n,
        }
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        match self.string(key).map(|v| v.to_ascii_lowercase()) {
            Some(v) if v == "true" || v == "1" => true,
            Some(v) if v == "false" || v == "0" => false,
            Some(v) => {
                warn!(subsystem = "api", variable = key, value = %v, default, "Invalid flag, using default");
                default
            }
            None => default,
        }
    }
}

/// Parse a comma-separated CORS origin list, skipping invalid entries.
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
