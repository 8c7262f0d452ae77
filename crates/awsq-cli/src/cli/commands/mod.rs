//! CLI command handlers, one file per command.

mod invoke;
mod services;
mod sign;

pub use invoke::run_invoke;
pub use services::run_services;
pub use sign::run_sign;

use super::Target;
use anyhow::{Context, Result};
use awsq_core::config::AwsqConfig;
use awsq_core::{ClientConfig, Credentials, ParameterSet, QueryClient};

/// Client config for `target`, with command-line overrides on top of the file.
fn client_config(cfg: &AwsqConfig, target: &Target) -> Result<ClientConfig> {
    let mut cfg = cfg.clone();
    if target.endpoint.is_some() || target.api_version.is_some() {
        let entry = cfg
            .services
            .entry(target.service.to_ascii_lowercase())
            .or_default();
        if let Some(url) = &target.endpoint {
            entry.service_url = Some(url.clone());
        }
        if let Some(version) = &target.api_version {
            entry.service_version = Some(version.clone());
        }
    }
    cfg.resolve(&target.service.to_ascii_lowercase())
}

fn client(cfg: &AwsqConfig, target: &Target) -> Result<QueryClient> {
    let client_cfg = client_config(cfg, target)?;
    let credentials = Credentials::from_env()
        .context("AWS_ACCESS_KEY_ID is not set (credentials come from the environment)")?;
    Ok(QueryClient::new(credentials, client_cfg))
}

fn params(target: &Target) -> ParameterSet {
    let mut p = ParameterSet::for_action(&target.action);
    for (name, value) in &target.params {
        p.insert(name.as_str(), value.as_str());
    }
    p
}
