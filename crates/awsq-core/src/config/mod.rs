//! Configuration file (`~/.config/awsq/config.toml`) and per-service resolution.

mod client;
pub mod profiles;

pub use client::{ClientConfig, DEFAULT_USER_AGENT};
pub use profiles::{profile, ServiceProfile, PROFILES};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry backoff parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Base delay in milliseconds; delay(n) = base * factor^n.
    pub base_delay_ms: u64,
    /// Exponential factor.
    pub backoff_factor: u32,
    /// Optional cap on a single backoff delay, in milliseconds.
    #[serde(default)]
    pub max_delay_ms: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 100,
            backoff_factor: 4,
            max_delay_ms: None,
        }
    }
}

/// Per-service overrides under `[services.<name>]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceOverride {
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub service_version: Option<String>,
    #[serde(default)]
    pub signature_method: Option<String>,
    #[serde(default)]
    pub max_error_retry: Option<u32>,
}

/// Global configuration loaded from `~/.config/awsq/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsqConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Signature version; only "2" is supported.
    pub signature_version: String,
    /// Default signature method ("HmacSHA256" or "HmacSHA1").
    pub signature_method: String,
    /// Retries after the first attempt on HTTP 500/503.
    pub max_error_retry: u32,
    /// Whole-request timeout per attempt, in seconds.
    pub timeout_secs: u64,
    /// Connect timeout per attempt, in seconds.
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub proxy_host: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<u16>,
    /// Optional retry backoff; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Per-service endpoint/version overrides keyed by service name.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceOverride>,
}

impl Default for AwsqConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            signature_version: "2".to_string(),
            signature_method: "HmacSHA256".to_string(),
            max_error_retry: 3,
            timeout_secs: 50,
            connect_timeout_secs: 15,
            proxy_host: None,
            proxy_port: None,
            retry: None,
            services: BTreeMap::new(),
        }
    }
}

impl AwsqConfig {
    /// Resolve the immutable client config for `service`.
    ///
    /// Layers: built-in profile, then file-wide defaults, then the
    /// `[services.<name>]` override. A service without a built-in profile
    /// must supply `service_url` and `service_version` in its override.
    pub fn resolve(&self, service: &str) -> Result<ClientConfig> {
        let builtin = profiles::profile(service);
        let over = self
            .services
            .get(service)
            .or_else(|| self.services.get(&service.to_ascii_lowercase()));

        let service_url = over
            .and_then(|o| o.service_url.clone())
            .or_else(|| builtin.map(|p| p.service_url.to_string()))
            .with_context(|| format!("unknown service '{}': set services.{}.service_url", service, service))?;
        let service_version = over
            .and_then(|o| o.service_version.clone())
            .or_else(|| builtin.map(|p| p.service_version.to_string()))
            .with_context(|| format!("unknown service '{}': set services.{}.service_version", service, service))?;

        let retry = self.retry.clone().unwrap_or_default();
        let mut cfg = ClientConfig::for_endpoint(service_url, service_version);
        cfg.signature_version = self.signature_version.clone();
        cfg.signature_method = over
            .and_then(|o| o.signature_method.clone())
            .unwrap_or_else(|| self.signature_method.clone());
        cfg.max_error_retry = over
            .and_then(|o| o.max_error_retry)
            .unwrap_or(self.max_error_retry);
        cfg.user_agent = self.user_agent.clone();
        cfg.timeout = Duration::from_secs(self.timeout_secs);
        cfg.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        cfg.proxy_host = self.proxy_host.clone();
        cfg.proxy_port = self.proxy_port;
        cfg.retry_base_delay = Duration::from_millis(retry.base_delay_ms);
        cfg.retry_backoff_factor = retry.backoff_factor;
        cfg.retry_max_delay = retry.max_delay_ms.map(Duration::from_millis);
        Ok(cfg)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("awsq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AwsqConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<AwsqConfig> {
    if !path.exists() {
        let default_cfg = AwsqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AwsqConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AwsqConfig::default();
        assert_eq!(cfg.signature_version, "2");
        assert_eq!(cfg.signature_method, "HmacSHA256");
        assert_eq!(cfg.max_error_retry, 3);
        assert_eq!(cfg.timeout_secs, 50);
        assert!(cfg.services.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = AwsqConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AwsqConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.max_error_retry, cfg.max_error_retry);
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
    }

    #[test]
    fn resolve_builtin_profile() {
        let cfg = AwsqConfig::default().resolve("sdb").unwrap();
        assert_eq!(cfg.service_url, "https://sdb.amazonaws.com/");
        assert_eq!(cfg.service_version, "2009-04-15");
        assert_eq!(cfg.retry_base_delay, Duration::from_millis(100));
        assert_eq!(cfg.retry_backoff_factor, 4);
    }

    #[test]
    fn resolve_unknown_service_without_override_fails() {
        let err = AwsqConfig::default().resolve("dynamodb").unwrap_err();
        assert!(err.to_string().contains("unknown service"));
    }

    #[test]
    fn config_toml_overrides() {
        let toml = r#"
            user_agent = "tests/1.0"
            signature_version = "2"
            signature_method = "HmacSHA1"
            max_error_retry = 5
            timeout_secs = 10
            connect_timeout_secs = 2
            proxy_host = "proxy.local"
            proxy_port = 3128

            [retry]
            base_delay_ms = 10
            backoff_factor = 2
            max_delay_ms = 500

            [services.sdb]
            service_url = "http://localhost:8080/"
            max_error_retry = 1

            [services.custom]
            service_url = "https://custom.example.com/"
            service_version = "2020-01-01"
            signature_method = "HmacSHA256"
        "#;
        let file: AwsqConfig = toml::from_str(toml).unwrap();

        let sdb = file.resolve("sdb").unwrap();
        assert_eq!(sdb.service_url, "http://localhost:8080/");
        assert_eq!(sdb.service_version, "2009-04-15");
        assert_eq!(sdb.signature_method, "HmacSHA1");
        assert_eq!(sdb.max_error_retry, 1);
        assert_eq!(sdb.user_agent, "tests/1.0");
        assert_eq!(sdb.timeout, Duration::from_secs(10));
        assert_eq!(sdb.proxy().as_deref(), Some("proxy.local:3128"));
        assert_eq!(sdb.retry_max_delay, Some(Duration::from_millis(500)));

        let custom = file.resolve("custom").unwrap();
        assert_eq!(custom.service_version, "2020-01-01");
        assert_eq!(custom.signature_method, "HmacSHA256");
        assert_eq!(custom.max_error_retry, 5);
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.max_error_retry, 3);

        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again.user_agent, cfg.user_agent);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_error_retry = \"many\"").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
