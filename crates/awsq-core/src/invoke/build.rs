//! Building: required parameters, canonical string, signature, body.

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::ConfigurationError;
use crate::params::ParameterSet;
use crate::signing::{self, SignatureMethod, SIGNATURE_PARAM};
use chrono::{DateTime, Utc};
use url::Url;

/// `2011-01-01T00:00:00.000Z`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A fully signed request, ready to send as many times as retries need.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub action: String,
    pub endpoint: Url,
    pub params: ParameterSet,
    pub string_to_sign: String,
    pub body: String,
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Assemble and sign. Nothing here touches the network.
pub fn build_signed(
    action: &str,
    params: ParameterSet,
    credentials: &Credentials,
    config: &ClientConfig,
    now: DateTime<Utc>,
) -> Result<SignedRequest, ConfigurationError> {
    if credentials.access_key_id.is_empty() {
        return Err(ConfigurationError::MissingAccessKeyId);
    }
    signing::check_signature_version(&config.signature_version)?;
    let method = SignatureMethod::from_name(&config.signature_method)?;
    let endpoint = signing::parse_endpoint(&config.service_url)?;

    let mut params = if params.contains("Action") {
        params
    } else {
        let mut with_action = ParameterSet::for_action(action);
        for (k, v) in params.iter() {
            with_action.insert(k, v);
        }
        with_action
    };
    params
        .insert("AWSAccessKeyId", credentials.access_key_id.as_str())
        .insert("Timestamp", format_timestamp(now))
        .insert("Version", config.service_version.as_str())
        .insert("SignatureVersion", signing::SIGNATURE_VERSION)
        .insert("SignatureMethod", method.wire_name());

    let string_to_sign = signing::string_to_sign_v2(&params, &endpoint);
    let signature = signing::sign(&string_to_sign, credentials.secret(), method)?;
    params.insert(SIGNATURE_PARAM, signature);

    let action = params.get("Action").unwrap_or(action).to_string();
    let body = params.to_body();
    Ok(SignedRequest {
        action,
        endpoint,
        params,
        string_to_sign,
        body,
    })
}
