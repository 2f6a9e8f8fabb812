use std::path::PathBuf;
use std::str::FromStr;

/// Source of configuration values. Production code reads the process
/// environment, tests pass a map.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Reads `key`, treating blank values as unset.
pub fn read_string(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn read_parsed<T: FromStr>(
    lookup: Lookup<'_>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match read_string(lookup, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

pub fn read_bool(lookup: Lookup<'_>, key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match read_string(lookup, key) {
        None => Ok(default),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartStoreBackend {
    Memory,
    Redis { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SmtpSettings {
    /// No mail server configured: confirmations are only logged.
    Disabled,
    Relay {
        server: String,
        username: String,
        password: String,
    },
    /// Unauthenticated local relay (Mailpit, MailHog).
    Local { host: String, port: u16 },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub database: DatabaseSettings,
    pub cors_allowed_origins: Vec<String>,
    pub images_dir: PathBuf,
    pub cart_store: CartStoreBackend,
    pub smtp: SmtpSettings,
    pub email_from: String,
}

impl AppConfig {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_IMAGES_DIR: &'static str = "product_images";
    pub const DEFAULT_CORS_ORIGINS: &'static [&'static str] = &[
        "http://localhost:5173",
        "http://localhost:5174",
        "http://127.0.0.1:5173",
        "http://127.0.0.1:5174",
    ];

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_name(
            &read_string(lookup, "RUST_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let host = read_string(lookup, "HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = read_parsed(lookup, "PORT", Self::DEFAULT_PORT)?;

        Ok(Self {
            environment,
            host,
            port,
            database: Self::database_settings(lookup)?,
            cors_allowed_origins: Self::cors_origins(lookup),
            images_dir: read_string(lookup, "PRODUCT_IMAGES_DIR")
                .unwrap_or_else(|| Self::DEFAULT_IMAGES_DIR.to_string())
                .into(),
            cart_store: Self::cart_store(lookup)?,
            smtp: Self::smtp_settings(lookup)?,
            email_from: read_string(lookup, "EMAIL_FROM")
                .unwrap_or_else(|| "no-reply@localhost".to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn database_settings(lookup: Lookup<'_>) -> Result<DatabaseSettings, ConfigError> {
        let url = match read_string(lookup, "DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = read_string(lookup, "USER_DB").unwrap_or_else(|| "postgres".into());
                let pass = read_string(lookup, "PASS_DB").unwrap_or_else(|| "postgres".into());
                let host = read_string(lookup, "HOST_DB").unwrap_or_else(|| "localhost".into());
                let port: u16 = read_parsed(lookup, "PORT_DB", 5432)?;
                let name = read_string(lookup, "NAME_DB").unwrap_or_else(|| "stock".into());
                format!("postgres://{user}:{pass}@{host}:{port}/{name}")
            }
        };

        let max_connections = read_parsed(lookup, "DB_MAX_CONNECTIONS", 20u32)?;
        let min_connections = read_parsed(lookup, "DB_MIN_CONNECTIONS", 2u32)?;
        if min_connections > max_connections {
            return Err(ConfigError::Invalid {
                key: "DB_MIN_CONNECTIONS",
                value: min_connections.to_string(),
            });
        }

        Ok(DatabaseSettings {
            url,
            max_connections,
            min_connections,
            run_migrations: read_bool(lookup, "RUN_MIGRATIONS", true)?,
        })
    }

    fn cors_origins(lookup: Lookup<'_>) -> Vec<String> {
        let mut origins: Vec<String> = match read_string(lookup, "CORS_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(|o| o.trim().trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => Self::DEFAULT_CORS_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        };

        if let Some(front) = read_string(lookup, "FRONT_URL") {
            let front = front.trim_end_matches('/').to_string();
            if !origins.contains(&front) {
                origins.push(front);
            }
        }

        origins
    }

    fn cart_store(lookup: Lookup<'_>) -> Result<CartStoreBackend, ConfigError> {
        match read_string(lookup, "CART_STORE")
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("memory") => Ok(CartStoreBackend::Memory),
            Some("redis") => Ok(CartStoreBackend::Redis {
                url: read_string(lookup, "REDIS_URL")
                    .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            }),
            Some(other) => Err(ConfigError::Invalid {
                key: "CART_STORE",
                value: other.to_string(),
            }),
        }
    }

    fn smtp_settings(lookup: Lookup<'_>) -> Result<SmtpSettings, ConfigError> {
        if let Some(server) = read_string(lookup, "SMTP_SERVER") {
            let username = read_string(lookup, "SMTP_USERNAME").unwrap_or_default();
            let password = read_string(lookup, "SMTP_PASSWORD").unwrap_or_default();
            return Ok(SmtpSettings::Relay {
                server,
                username,
                password,
            });
        }

        match read_string(lookup, "SMTP_HOST") {
            Some(host) => Ok(SmtpSettings::Local {
                host,
                port: read_parsed(lookup, "SMTP_PORT", 1025u16)?,
            }),
            None => Ok(SmtpSettings::Disabled),
        }
    }
}
