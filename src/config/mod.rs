use sqlx::postgres::PgConnectOptions;
use std::env;

const DEFAULT_DB_NAME: &str = "option_theta_iq";

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Database. `database_url` wins over the individual parameters when set.
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset and empty values take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.into());

        let parse_port = |key: &str, default: &str| -> anyhow::Result<u16> {
            get_or(key, default)
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("{key} must be a valid port: {e}"))
        };

        let db_max_connections = get_or("DB_MAX_CONNECTIONS", "10")
            .trim()
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a positive integer: {e}"))?;
        if db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be a positive integer");
        }

        let run_migrations = get_or("RUN_MIGRATIONS", "true")
            .trim()
            .parse::<bool>()
            .map_err(|e| anyhow::anyhow!("RUN_MIGRATIONS must be true or false: {e}"))?;

        let log_format = match get_or("LOG_FORMAT", "pretty").trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" | "text" => LogFormat::Pretty,
            other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{other}'"),
        };

        Ok(Self {
            host: get_or("HOST", "0.0.0.0"),
            port: parse_port("PORT", "3001")?,
            database_url: get("DATABASE_URL"),
            db_host: get_or("DB_HOST", "localhost"),
            db_port: parse_port("DB_PORT", "5432")?,
            db_name: get_or("DB_NAME", DEFAULT_DB_NAME),
            db_user: get_or("DB_USER", "postgres"),
            db_password: get("DB_PASSWORD").unwrap_or_default(),
            db_max_connections,
            run_migrations,
            log_format,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection options for the pool.
    pub fn pg_connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return url
                .parse()
                .map_err(|e| anyhow::anyhow!("DATABASE_URL is invalid: {e}"));
        }

        let mut options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .database(&self.db_name)
            .username(&self.db_user);
        if !self.db_password.is_empty() {
            options = options.password(&self.db_password);
        }
        Ok(options)
    }
}
