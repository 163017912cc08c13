use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub query_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub algorithm: String,
    pub ttl_seconds: i64,
}

// Keeps the secret out of logs
impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Argon2 cost parameters
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `TOKEN_SECRET`, `TOKEN_ALGORITHM`, `TOKEN_TTL_SECONDS`
    /// 2. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults (everything except the database URL and token secret)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(env::vars().collect())
    }

    /// Same layering as [`Config::load`], reading variables from `vars`
    /// instead of the process environment.
    pub fn load_from(vars: Map<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars
            .get("RUN_MODE")
            .cloned()
            .unwrap_or_else(|| "development".to_string());
        let token_secret = vars.get("TOKEN_SECRET").cloned();
        let token_algorithm = vars.get("TOKEN_ALGORITHM").cloned();
        let token_ttl_seconds = vars.get("TOKEN_TTL_SECONDS").cloned();

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("database.query_timeout_secs", 5)?
            .set_default("server.http_port", 8000)?
            .set_default("token.algorithm", "HMAC-SHA256")?
            .set_default("token.ttl_seconds", 1800)?
            .set_default("password.memory_cost_kib", 19456)?
            .set_default("password.time_cost", 2)?
            .set_default("password.parallelism", 1)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__").source(Some(vars)))
            .set_override_option("token.secret", token_secret)?
            .set_override_option("token.algorithm", token_algorithm)?
            .set_override_option("token.ttl_seconds", token_ttl_seconds)?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "token.secret (TOKEN_SECRET) must be set and non-empty".to_string(),
            ));
        }
        if self.token.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must be positive, got {}",
                self.token.ttl_seconds
            )));
        }
        if self.database.query_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "database.query_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
