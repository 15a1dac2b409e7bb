//! Process configuration, resolved once at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://data.usajobs.gov/api/search";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CREDENTIALS_PATH: &str = "auth/credentials.json";
pub const DEFAULT_STATIC_DIR: &str = "html";

/// Read-only settings shared by every request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_base_url: Url,
    pub user_agent: String,
    pub authorization_key: String,
    pub timeout: Duration,
    pub static_dir: PathBuf,
}

/// Shape of `auth/credentials.json`.
#[derive(Debug, Default, Deserialize)]
struct Credentials {
    #[serde(rename = "User-Agent")]
    user_agent: Option<String>,
    #[serde(rename = "Authorization-Key")]
    authorization_key: Option<String>,
}

impl Config {
    /// Loads configuration from the credentials file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration with `lookup` standing in for the environment.
    /// Environment values win over the credentials file; empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let credentials_path =
            PathBuf::from(var("CREDENTIALS_PATH").unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.into()));
        let credentials = read_credentials(&credentials_path)?;

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let timeout_ms = match var("UPSTREAM_TIMEOUT_MS") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let base = var("UPSTREAM_BASE_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.into());
        let upstream_base_url = parse_base_url(&base)?;

        let user_agent = var("USER_AGENT")
            .or(credentials.user_agent)
            .unwrap_or_default();
        let authorization_key = var("AUTHORIZATION_KEY")
            .or(credentials.authorization_key)
            .unwrap_or_default();

        if authorization_key.is_empty() {
            warn!("No Authorization-Key configured; upstream will reject searches");
        }

        Ok(Self {
            port,
            upstream_base_url,
            user_agent,
            authorization_key,
            timeout: Duration::from_millis(timeout_ms),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    /// Value of the outbound `Host` header, including a non-default port.
    pub fn upstream_host(&self) -> String {
        let host = self.upstream_base_url.host_str().unwrap_or_default();
        match self.upstream_base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;
    if url.host_str().is_none() {
        return Err(ConfigError::MissingHost {
            value: value.to_string(),
        });
    }
    Ok(url)
}

fn read_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Credentials file {:?} not found, relying on environment", path);
            return Ok(Credentials::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    info!("Loaded credentials from {:?}", path);
    serde_json::from_str(&content).map_err(|source| ConfigError::Credentials {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        map.entry("CREDENTIALS_PATH".into())
            .or_insert_with(|| "does/not/exist.json".into());
        move |name: &str| map.get(name).cloned()
    }

    fn temp_credentials(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.json", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_credentials() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timeout, Duration::from_millis(5000));
        assert_eq!(config.upstream_host(), "data.usajobs.gov");
        assert_eq!(config.static_dir, PathBuf::from("html"));
        assert!(config.authorization_key.is_empty());
    }

    #[test]
    fn test_credentials_file_is_read() {
        let path = temp_credentials(
            "creds-read",
            r#"{"User-Agent": "me@example.com", "Authorization-Key": "secret"}"#,
        );
        let config =
            Config::from_lookup(lookup(&[("CREDENTIALS_PATH", path.to_str().unwrap())])).unwrap();
        assert_eq!(config.user_agent, "me@example.com");
        assert_eq!(config.authorization_key, "secret");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_environment_overrides_credentials() {
        let path = temp_credentials(
            "creds-override",
            r#"{"User-Agent": "file-agent", "Authorization-Key": "file-key"}"#,
        );
        let config = Config::from_lookup(lookup(&[
            ("CREDENTIALS_PATH", path.to_str().unwrap()),
            ("AUTHORIZATION_KEY", "env-key"),
            ("USER_AGENT", ""),
        ]))
        .unwrap();
        assert_eq!(config.authorization_key, "env-key");
        assert_eq!(config.user_agent, "file-agent");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_malformed_credentials_fail() {
        let path = temp_credentials("creds-bad", "{not json");
        let result = Config::from_lookup(lookup(&[("CREDENTIALS_PATH", path.to_str().unwrap())]));
        assert!(matches!(result, Err(ConfigError::Credentials { .. })));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_port_and_timeout() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidPort { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("UPSTREAM_TIMEOUT_MS", "-1")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_upstream_host_keeps_explicit_port() {
        let config =
            Config::from_lookup(lookup(&[("UPSTREAM_BASE_URL", "http://127.0.0.1:8081/api/search")]))
                .unwrap();
        assert_eq!(config.upstream_host(), "127.0.0.1:8081");
    }

    #[test]
    fn test_base_url_must_parse() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("UPSTREAM_BASE_URL", "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
