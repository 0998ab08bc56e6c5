use std::fmt::Debug;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Server configuration, read once at startup.
///
/// Every field except the JWT secret has a development default. A value
/// that is set but does not parse aborts startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins (`CORS_ORIGINS`, comma separated).
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Upper bound on closing the database pool after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                    |
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 8000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 10),
            jwt: JwtConfig::from_env(),
            auth: AuthConfig::from_env(),
        }
    }

    /// The socket address to bind. Panics on a malformed `HOST`.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = self
            .host
            .parse()
            .unwrap_or_else(|e| panic!("HOST '{}' is not an IP address: {e}", self.host));
        SocketAddr::new(ip, self.port)
    }
}

/// Password and reset-token policy.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub min_password_length: usize,
    pub reset_token_expiry_mins: i64,
    /// Return the plaintext reset token from `forgot-password`.
    ///
    /// There is no mail delivery, so development and test setups turn this on.
    pub expose_reset_token: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            reset_token_expiry_mins: 60,
            expose_reset_token: false,
        }
    }
}

impl AuthConfig {
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `MIN_PASSWORD_LENGTH`     | `8`     |
    /// | `RESET_TOKEN_EXPIRY_MINS` | `60`    |
    /// | `AUTH_EXPOSE_RESET_TOKEN` | `false` |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_password_length: env_or("MIN_PASSWORD_LENGTH", defaults.min_password_length),
            reset_token_expiry_mins: env_or(
                "RESET_TOKEN_EXPIRY_MINS",
                defaults.reset_token_expiry_mins,
            ),
            expose_reset_token: std::env::var("AUTH_EXPOSE_RESET_TOKEN")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.expose_reset_token),
        }
    }
}

/// Read and parse an env var, falling back to `default` when it is unset.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e:?}")),
        Err(_) => default,
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(is_truthy(v), "{v} should be truthy");
        }
        for v in ["0", "false", "", "nope"] {
            assert!(!is_truthy(v), "{v} should be falsy");
        }
    }

    #[test]
    fn env_or_uses_default_when_unset() {
        let port: u16 = env_or("PULSE_TEST_SURELY_UNSET_PORT", 4242);
        assert_eq!(port, 4242);
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 9000,
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            shutdown_timeout_secs: 10,
            jwt: JwtConfig {
                secret: "s".into(),
                access_token_expiry_mins: 15,
                refresh_token_expiry_days: 7,
            },
            auth: AuthConfig::default(),
        };
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9000");
    }
}
