//! Access key id plus a secret key buffer that is wiped when dropped.

use std::fmt;
use zeroize::Zeroizing;

/// Secret access key bytes.
///
/// Not `Display`, `Serialize` or `Clone`. `Debug` prints a fixed placeholder, so
/// the key cannot end up in logs or error messages. The buffer is zeroed when
/// the value is dropped.
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into().into_bytes()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw key bytes, used verbatim as the HMAC key.
    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

/// Access key id and secret for one client.
#[derive(Debug)]
pub struct Credentials {
    pub access_key_id: String,
    secret: Option<SecretKey>,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret: Some(SecretKey::new(secret_access_key)),
        }
    }

    /// Credentials with no secret at all; signing fails with a configuration error.
    pub fn without_secret(access_key_id: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret: None,
        }
    }

    /// Read `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` from the environment.
    pub fn from_env() -> Option<Self> {
        let id = std::env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret = std::env::var("AWS_SECRET_ACCESS_KEY").ok();
        Some(match secret {
            Some(s) => Self::new(id, s),
            None => Self::without_secret(id),
        })
    }

    pub fn secret(&self) -> Option<&SecretKey> {
        self.secret.as_ref()
    }

    /// Wipe the secret now instead of waiting for drop.
    pub fn dispose(&mut self) {
        // Dropping the Zeroizing buffer zeroes it.
        self.secret = None;
    }
}
