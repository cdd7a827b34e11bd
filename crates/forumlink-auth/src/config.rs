//! Service configuration.
//!
//! Read once from the environment at startup and injected into Axum
//! handlers via [`axum::extract::State`]. A missing or empty secret or
//! domain aborts startup — a handshake must never discover at request
//! time that it cannot be signed.

use forumlink_sso::SharedSecret;

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("required environment variable {name} is not set")]
    MissingVar {
        /// Name of the variable.
        name: &'static str,
    },

    /// `DISCOURSE_SECRET` is set but empty.
    #[error("DISCOURSE_SECRET must not be empty")]
    EmptySecret,

    /// `DISCOURSE_DOMAIN` is set but empty (or nothing but slashes).
    #[error("DISCOURSE_DOMAIN must not be empty")]
    EmptyDomain,
}

/// Global configuration shared across all handlers.
///
/// Constructed once at startup and passed as Axum shared state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared HMAC key for both legs of the handshake.
    pub secret: SharedSecret,
    /// Forum base URL, without trailing slash.
    pub forum_url: String,
    /// Port to listen on (default `3002`).
    pub listen_port: u16,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable           | Default | Description                           |
    /// |--------------------|---------|---------------------------------------|
    /// | `DISCOURSE_SECRET` | —       | shared HMAC key (required, non-empty) |
    /// | `DISCOURSE_DOMAIN` | —       | forum base URL (required)             |
    /// | `AUTH_PORT`        | `3002`  | HTTP listen port                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("DISCOURSE_SECRET").map_err(|_| ConfigError::MissingVar {
            name: "DISCOURSE_SECRET",
        })?;
        let domain = std::env::var("DISCOURSE_DOMAIN").map_err(|_| ConfigError::MissingVar {
            name: "DISCOURSE_DOMAIN",
        })?;
        let listen_port: u16 = std::env::var("AUTH_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3002);

        Self::from_values(&secret, &domain, listen_port)
    }

    /// Build the configuration from explicit values.
    ///
    /// Trailing slashes on `domain` are stripped so redirect URLs can be
    /// assembled by simple concatenation.
    pub fn from_values(secret: &str, domain: &str, listen_port: u16) -> Result<Self, ConfigError> {
        let secret = SharedSecret::new(secret).map_err(|_| ConfigError::EmptySecret)?;

        let forum_url = domain.trim_end_matches('/').to_string();
        if forum_url.is_empty() {
            return Err(ConfigError::EmptyDomain);
        }

        Ok(Self {
            secret,
            forum_url,
            listen_port,
        })
    }
}
