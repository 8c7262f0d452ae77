//! Signature version 2: canonical string, percent-encoding and HMAC.

mod canonical;
mod encode;
mod signer;

pub use canonical::{parse_endpoint, string_to_sign_v2, SIGNATURE_PARAM};
pub use encode::{url_encode, url_encode_path};
pub use signer::{sign, SignatureMethod};

use crate::error::ConfigurationError;

/// The only signature version this client produces.
pub const SIGNATURE_VERSION: &str = "2";

/// Reject anything other than version 2 before a request is built.
pub fn check_signature_version(version: &str) -> Result<(), ConfigurationError> {
    if version == SIGNATURE_VERSION {
        Ok(())
    } else {
        Err(ConfigurationError::UnsupportedSignatureVersion(version.to_string()))
    }
}
