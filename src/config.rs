use std::env;
use std::fmt;

use crate::auth::token::JwtConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// One year.
const MAX_EXPIRE_MINUTES: i64 = 525_600;

/// Reasons the process configuration could not be loaded.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide settings, read once at startup and handed to whoever needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let expire_minutes: i64 = parse(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            required("ACCESS_TOKEN_EXPIRE_MINUTES")?,
        )?;
        if !(1..=MAX_EXPIRE_MINUTES).contains(&expire_minutes) {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                value: expire_minutes.to_string(),
            });
        }

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(value) => parse("BCRYPT_COST", value)?,
            None => bcrypt::DEFAULT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(value) => parse("DATABASE_MAX_CONNECTIONS", value)?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
            server_port: match lookup("SERVER_PORT") {
                Some(value) => parse("SERVER_PORT", value)?,
                None => DEFAULT_PORT,
            },
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            jwt: JwtConfig::new(required("JWT_SECRET")?, expire_minutes),
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
