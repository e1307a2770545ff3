//! Process configuration, read from the environment once at startup.
//!
//! Raw variables stay here; the rest of the binary only sees the resolved
//! [`Config`] struct passed into the client and reconciler constructors.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REMOTE_API: &str = "https://challenge.crossmint.io/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CANDIDATE_ID must be set")]
    MissingCandidateId,
    #[error("invalid {name} value '{raw}': {reason}")]
    Invalid {
        name: &'static str,
        raw: String,
        reason: String,
    },
}

/// Resolved startup parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port for the HTTP shell.
    pub port: u16,
    /// Base URL of the remote megaverse API.
    pub remote_api: String,
    /// Static identifier sent with every remote call.
    pub candidate_id: String,
    /// Bound on any single remote request.
    pub request_timeout: Duration,
    /// Compare attributes (not only kinds) when verifying convergence.
    pub strict_verification: bool,
}

impl Config {
    /// Read and validate configuration from the environment.
    ///
    /// `PORT`, `CROSSMINT_API`, `REQUEST_TIMEOUT_SECS`, and `STRICT_VERIFY`
    /// have defaults; `CANDIDATE_ID` is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let candidate_id = env_var("CANDIDATE_ID").ok_or(ConfigError::MissingCandidateId)?;
        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT)?,
            remote_api: env_var("CROSSMINT_API").unwrap_or_else(|| DEFAULT_REMOTE_API.to_string()),
            candidate_id,
            request_timeout: Duration::from_secs(env_parse(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            strict_verification: env_parse("STRICT_VERIFY", false)?,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parse<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env_var(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            raw,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};

    // One test body: the process environment is shared, so the scenarios
    // must not run in parallel with each other.
    #[test]
    fn from_env_resolves_defaults_and_overrides() {
        unsafe {
            std::env::remove_var("CANDIDATE_ID");
            std::env::remove_var("PORT");
            std::env::remove_var("CROSSMINT_API");
            std::env::remove_var("REQUEST_TIMEOUT_SECS");
            std::env::remove_var("STRICT_VERIFY");
        }

        // Missing candidate id is the one hard failure.
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingCandidateId)
        ));

        unsafe {
            std::env::set_var("CANDIDATE_ID", "cand-1");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.remote_api, "https://challenge.crossmint.io/api");
        assert_eq!(config.request_timeout.as_secs(), 30);
        assert!(!config.strict_verification);

        unsafe {
            std::env::set_var("PORT", "8080");
            std::env::set_var("CROSSMINT_API", "http://localhost:9999/api");
            std::env::set_var("STRICT_VERIFY", "true");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.remote_api, "http://localhost:9999/api");
        assert!(config.strict_verification);

        unsafe {
            std::env::set_var("PORT", "not-a-port");
        }
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));

        unsafe {
            std::env::remove_var("CANDIDATE_ID");
            std::env::remove_var("PORT");
            std::env::remove_var("CROSSMINT_API");
            std::env::remove_var("STRICT_VERIFY");
        }
    }
}
