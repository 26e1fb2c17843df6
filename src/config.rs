//! Runtime configuration read from environment variables.
//!
//! | Variable       | Default                              |
//! |----------------|--------------------------------------|
//! | `DATABASE_URL` | `sqlite://restcrud.sqlite3?mode=rwc` |
//! | `BIND_ADDR`    | `127.0.0.1:8088`                     |
//! | `CORS_ORIGIN`  | `*`                                  |
//! | `VERBOSE`      | `false`                              |

use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://restcrud.sqlite3?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8088";
pub const DEFAULT_CORS_ORIGIN: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// `*` accepts every origin.
    pub cors_origin: String,
    /// Log list statements at `info` level and raise the default log level.
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            verbose: false,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            verbose: get("VERBOSE").is_some_and(|value| parse_flag(&value)),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
