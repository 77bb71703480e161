use arcade_core::collaboration::{
    validate_lease_ttl, validate_presence_window, DEFAULT_LEASE_TTL_SECS,
    DEFAULT_PRESENCE_WINDOW_SECS,
};
use arcade_core::lease::EditPolicy;

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{var} is out of range: {reason}")]
    OutOfRange { var: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lease TTL used when an acquire request names none (default: `300`).
    pub default_lease_ttl_secs: i64,
    /// Presence window used when a query names none (default: `15`).
    pub presence_window_secs: i64,
    /// Whether edits require the editor to hold a live lease.
    pub edit_policy: EditPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            default_lease_ttl_secs: DEFAULT_LEASE_TTL_SECS,
            presence_window_secs: DEFAULT_PRESENCE_WINDOW_SECS,
            edit_policy: EditPolicy::Permissive,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `DEFAULT_LEASE_TTL_SECS` | `300`                   |
    /// | `PRESENCE_WINDOW_SECS`   | `15`                    |
    /// | `EDIT_REQUIRES_LEASE`    | `false`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", "a valid u16", defaults.port)?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        let request_timeout_secs = parse_var(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            "a valid u64",
            defaults.request_timeout_secs,
        )?;

        let default_lease_ttl_secs = parse_var(
            &lookup,
            "DEFAULT_LEASE_TTL_SECS",
            "an integer",
            defaults.default_lease_ttl_secs,
        )?;
        validate_lease_ttl(default_lease_ttl_secs).map_err(|reason| ConfigError::OutOfRange {
            var: "DEFAULT_LEASE_TTL_SECS",
            reason,
        })?;

        let presence_window_secs = parse_var(
            &lookup,
            "PRESENCE_WINDOW_SECS",
            "an integer",
            defaults.presence_window_secs,
        )?;
        validate_presence_window(presence_window_secs).map_err(|reason| {
            ConfigError::OutOfRange {
                var: "PRESENCE_WINDOW_SECS",
                reason,
            }
        })?;

        let edit_policy = if parse_var(&lookup, "EDIT_REQUIRES_LEASE", "true or false", false)? {
            EditPolicy::Strict
        } else {
            EditPolicy::Permissive
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_lease_ttl_secs,
            presence_window_secs,
            edit_policy,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
