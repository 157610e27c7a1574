//! Server configuration loaded from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ROSTER_HTTP_ADDR | 0.0.0.0:8080 | listen address |
//! | ROSTER_DB_PATH | roster.sqlite3 | SQLite file, `:memory:` for in-memory |
//! | ROSTER_LOG_LEVEL | debug (debug build) / info | trace/debug/info/warn/error |
//! | ROSTER_LOG_DIR | unset (stderr) | absolute directory for rolling logs |
//! | ROSTER_SEED_SAMPLE_DATA | false | seed sample employees into an empty table |
//!
//! Unparseable values fall back to their defaults.

use roster_core::default_log_level;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_PATH: &str = "roster.sqlite3";
/// `ROSTER_DB_PATH` value selecting a throwaway in-memory database.
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub http_addr: String,
    pub db_path: String,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<String>,
    pub seed_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed_sample_data: false,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            http_addr: non_empty("ROSTER_HTTP_ADDR").unwrap_or(defaults.http_addr),
            db_path: non_empty("ROSTER_DB_PATH").unwrap_or(defaults.db_path),
            log_level: non_empty("ROSTER_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: non_empty("ROSTER_LOG_DIR"),
            seed_sample_data: non_empty("ROSTER_SEED_SAMPLE_DATA")
                .and_then(|value| parse_bool(&value))
                .unwrap_or(defaults.seed_sample_data),
        }
    }

    pub fn uses_in_memory_db(&self) -> bool {
        self.db_path == IN_MEMORY_DB_PATH
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
