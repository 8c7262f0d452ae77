//! Immutable per-client configuration, resolved once from the config file.

use crate::retry::RetryPolicy;
use std::time::Duration;

/// Everything the pipeline needs to talk to one service endpoint.
///
/// Built by [`super::AwsqConfig::resolve`] (or directly in tests) and never
/// mutated afterwards; shared read-only by every call made through a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service endpoint, e.g. `https://sdb.amazonaws.com/`.
    pub service_url: String,
    /// API version sent as the `Version` parameter.
    pub service_version: String,
    /// Only `"2"` is supported.
    pub signature_version: String,
    /// `HmacSHA256` or `HmacSHA1` (see `signing::SignatureMethod::from_name`).
    pub signature_method: String,
    /// Retries after the first attempt for 500/503 responses.
    pub max_error_retry: u32,
    pub user_agent: String,
    /// Whole-request timeout for a single attempt.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    /// Backoff base: delay(n) = base * factor^n.
    pub retry_base_delay: Duration,
    pub retry_backoff_factor: u32,
    pub retry_max_delay: Option<Duration>,
}

pub const DEFAULT_USER_AGENT: &str = concat!("awsq/", env!("CARGO_PKG_VERSION"));

impl ClientConfig {
    /// Config for an arbitrary endpoint with library defaults for everything else.
    pub fn for_endpoint(service_url: impl Into<String>, service_version: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            service_version: service_version.into(),
            signature_version: "2".to_string(),
            signature_method: "HmacSHA256".to_string(),
            max_error_retry: 3,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(50),
            connect_timeout: Duration::from_secs(15),
            proxy_host: None,
            proxy_port: None,
            retry_base_delay: Duration::from_millis(100),
            retry_backoff_factor: 4,
            retry_max_delay: None,
        }
    }

    /// Retry policy derived from the retry fields.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_error_retry: self.max_error_retry,
            base_delay: self.retry_base_delay,
            backoff_factor: self.retry_backoff_factor,
            max_delay: self.retry_max_delay,
        }
    }

    /// `host:port` proxy string for the transport, if a proxy host is set.
    pub fn proxy(&self) -> Option<String> {
        self.proxy_host.as_ref().map(|host| match self.proxy_port {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_defaults() {
        let cfg = ClientConfig::for_endpoint("https://sdb.amazonaws.com/", "2009-04-15");
        assert_eq!(cfg.signature_version, "2");
        assert_eq!(cfg.signature_method, "HmacSHA256");
        assert_eq!(cfg.max_error_retry, 3);
        assert_eq!(cfg.timeout, Duration::from_secs(50));
        assert!(cfg.user_agent.starts_with("awsq/"));
    }

    #[test]
    fn proxy_string() {
        let mut cfg = ClientConfig::for_endpoint("https://sdb.amazonaws.com/", "2009-04-15");
        assert!(cfg.proxy().is_none());
        cfg.proxy_host = Some("proxy.local".to_string());
        assert_eq!(cfg.proxy().as_deref(), Some("proxy.local"));
        cfg.proxy_port = Some(3128);
        assert_eq!(cfg.proxy().as_deref(), Some("proxy.local:3128"));
    }

    #[test]
    fn retry_policy_mirrors_fields() {
        let mut cfg = ClientConfig::for_endpoint("https://sdb.amazonaws.com/", "2009-04-15");
        cfg.max_error_retry = 5;
        let p = cfg.retry_policy();
        assert_eq!(p.max_error_retry, 5);
        assert_eq!(p.base_delay, Duration::from_millis(100));
        assert_eq!(p.backoff_factor, 4);
    }
}
