//! Signature version 2 string-to-sign.

use super::encode::{url_encode, url_encode_path};
use crate::error::ConfigurationError;
use crate::params::ParameterSet;
use percent_encoding::percent_decode_str;
use url::Url;

/// Parameter that carries the signature itself; never part of what is signed.
pub const SIGNATURE_PARAM: &str = "Signature";

/// Parse the configured service URL; it must have a host.
pub fn parse_endpoint(service_url: &str) -> Result<Url, ConfigurationError> {
    let url = Url::parse(service_url).map_err(|e| ConfigurationError::InvalidEndpoint {
        url: service_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigurationError::InvalidEndpoint {
            url: service_url.to_string(),
            reason: "no host".to_string(),
        });
    }
    Ok(url)
}

/// Build the canonical string-to-sign:
///
/// ```text
/// POST\n<lower-case host>\n<encoded path or />\n<k1=v1&k2=v2...>
/// ```
///
/// Pairs are sorted by name with ordinal (byte-wise) comparison; both name and
/// value are percent-encoded. `Signature` is excluded.
pub fn string_to_sign_v2(params: &ParameterSet, endpoint: &Url) -> String {
    let mut sorted: Vec<(&str, &str)> = params
        .iter()
        .filter(|(k, _)| *k != SIGNATURE_PARAM)
        .collect();
    sorted.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let host = endpoint.host_str().unwrap_or_default().to_ascii_lowercase();
    // `Url` keeps the path percent-encoded; decode once so it is not encoded twice.
    let path = match endpoint.path() {
        "" => "/".to_string(),
        p => percent_decode_str(p).decode_utf8_lossy().into_owned(),
    };

    let mut out = String::with_capacity(512);
    out.push_str("POST\n");
    out.push_str(&host);
    out.push('\n');
    out.push_str(&url_encode_path(&path));
    out.push('\n');
    for (i, (k, v)) in sorted.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(&url_encode(k));
        out.push('=');
        out.push_str(&url_encode(v));
    }
    out
}
