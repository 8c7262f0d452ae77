//! HMAC signature over the canonical string.

use crate::credentials::SecretKey;
use crate::error::ConfigurationError;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

/// Supported `SignatureMethod` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMethod {
    HmacSha1,
    HmacSha256,
}

impl SignatureMethod {
    /// Parse a configured method name. Case, `-` and `_` are ignored, so
    /// `HmacSHA256`, `hmac-sha256` and `HMAC_SHA256` are all accepted.
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        let folded: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match folded.as_str() {
            "HMACSHA1" => Ok(Self::HmacSha1),
            "HMACSHA256" => Ok(Self::HmacSha256),
            _ => Err(ConfigurationError::UnknownSignatureMethod(name.to_string())),
        }
    }

    /// Value sent as the `SignatureMethod` parameter.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::HmacSha1 => "HmacSHA1",
            Self::HmacSha256 => "HmacSHA256",
        }
    }
}

/// Base64 HMAC of `data` keyed by the secret's raw bytes.
///
/// A missing or empty secret is a configuration error; nothing is signed.
pub fn sign(
    data: &str,
    secret: Option<&SecretKey>,
    method: SignatureMethod,
) -> Result<String, ConfigurationError> {
    let key = match secret {
        Some(k) if !k.is_empty() => k.expose(),
        _ => return Err(ConfigurationError::MissingSecretKey),
    };
    let raw = match method {
        SignatureMethod::HmacSha1 => {
            let mut mac =
                Hmac::<Sha1>::new_from_slice(key).map_err(|_| ConfigurationError::InvalidKey)?;
            mac.update(data.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureMethod::HmacSha256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(key).map_err(|_| ConfigurationError::InvalidKey)?;
            mac.update(data.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(base64::engine::general_purpose::STANDARD.encode(raw))
}
