use std::env;

use thiserror::Error;

const DEV_JWT_SECRET: &str = "orgql-dev-secret-do-not-use-in-production";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set outside dev mode")]
    MissingJwtSecret,

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Credentials for the first login, created at startup when no users exist.
#[derive(Debug, Clone)]
pub struct BootstrapUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    pub bootstrap_user: Option<BootstrapUser>,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("ORGQL_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if dev_mode => DEV_JWT_SECRET.to_string(),
            _ => return Err(ConfigError::MissingJwtSecret),
        };

        let token_ttl_secs = match env::var("TOKEN_TTL_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "TOKEN_TTL_SECS",
                    value: v,
                })?,
            Err(_) => 3600,
        };

        let bootstrap_user = match (env::var("BOOTSTRAP_USERNAME"), env::var("BOOTSTRAP_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(BootstrapUser { username, password }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "orgql.db".to_string()),
            jwt_secret,
            token_ttl_secs,
            bootstrap_user,
            dev_mode,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
