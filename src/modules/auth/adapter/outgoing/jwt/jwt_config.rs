use crate::config::{read_parsed, read_string, ConfigError, Environment, Lookup};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    pub const MIN_SECRET_LEN: usize = 32;
    const DEVELOPMENT_SECRET: &'static str = "development-only-secret-change-me-now";

    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        Self::from_lookup(environment, &crate::config::env_lookup)
    }

    /// Production requires an explicit secret of at least 32 bytes.
    /// Elsewhere a missing or short secret only logs a warning.
    pub fn from_lookup(environment: Environment, lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let secret_key = match read_string(lookup, "JWT_SECRET") {
            Some(secret) => secret,
            None if environment.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                Self::DEVELOPMENT_SECRET.to_string()
            }
        };

        if secret_key.len() < Self::MIN_SECRET_LEN {
            if environment.is_production() {
                return Err(ConfigError::Invalid {
                    key: "JWT_SECRET",
                    value: format!("{} bytes, at least {} required", secret_key.len(), Self::MIN_SECRET_LEN),
                });
            }
            tracing::warn!(
                len = secret_key.len(),
                "JWT_SECRET is shorter than {} bytes",
                Self::MIN_SECRET_LEN
            );
        }

        let access_token_expiry: i64 = read_parsed(lookup, "JWT_ACCESS_EXPIRY", 3600)?;
        if access_token_expiry <= 0 || access_token_expiry > 86400 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                value: access_token_expiry.to_string(),
            });
        }

        let issuer = read_string(lookup, "JWT_ISSUER").unwrap_or_else(|| "stock-shop".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
