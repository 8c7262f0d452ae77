//! Error taxonomy of the invocation pipeline.
//!
//! A call ends in exactly one of: a typed result, [`ConfigurationError`],
//! [`TransportError`], a service error, or a [`DecodeError`] for a 2xx body
//! that could not be decoded.

use crate::transport::TransportError;
use std::fmt;
use thiserror::Error;

/// Missing or invalid credentials, signature settings or endpoint. Never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("access key id is empty")]
    MissingAccessKeyId,
    #[error("secret access key is missing or empty")]
    MissingSecretKey,
    #[error("unknown signature method '{0}' (expected HmacSHA1 or HmacSHA256)")]
    UnknownSignatureMethod(String),
    #[error("invalid signature version '{0}': only \"2\" is supported")]
    UnsupportedSignatureVersion(String),
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("secret key cannot be used as an HMAC key")]
    InvalidKey,
}

/// How a [`ServiceError`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// Body matched a known error envelope.
    Service,
    /// Body was well-formed markup but not a known error envelope.
    Unrecognized,
    /// Body was absent or not parseable; only the status is known.
    InternalError,
    /// 500/503 kept coming back after the last allowed retry.
    RetriesExhausted,
}

/// A non-2xx HTTP response, decoded as far as the body allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub code: Option<String>,
    pub message: String,
    /// `Sender` / `Receiver` when the envelope carries a `<Type>`.
    pub error_type: Option<String>,
    pub request_id: Option<String>,
    pub status: u16,
    pub box_usage: Option<String>,
    pub raw_body: Option<String>,
}

impl ServiceError {
    /// Generic error for an absent or unparseable body.
    pub fn internal(status: u16, raw_body: Option<String>) -> Self {
        Self {
            kind: ServiceErrorKind::InternalError,
            code: None,
            message: "Internal Error".to_string(),
            error_type: None,
            request_id: None,
            status,
            box_usage: None,
            raw_body,
        }
    }

    /// Well-formed markup that is not an error envelope the decoder knows.
    pub fn unrecognized(status: u16, raw_body: String) -> Self {
        Self {
            kind: ServiceErrorKind::Unrecognized,
            message: "Unrecognized error response".to_string(),
            raw_body: Some(raw_body),
            ..Self::internal(status, None)
        }
    }

    /// Retry ceiling reached; carries the last observed status.
    pub fn retries_exhausted(max_error_retry: u32, status: u16, raw_body: Option<String>) -> Self {
        Self {
            kind: ServiceErrorKind::RetriesExhausted,
            message: format!(
                "Maximum number of retry attempts reached : {}",
                max_error_retry
            ),
            ..Self::internal(status, raw_body)
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_code(&self, code: &str) -> bool {
        self.kind == ServiceErrorKind::Service && self.code() == Some(code)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {} (HTTP {})", code, self.message, self.status)?,
            None => write!(f, "{} (HTTP {})", self.message, self.status)?,
        }
        if let Some(id) = &self.request_id {
            write!(f, " [request id {}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// A response body that could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed response at byte {position}: {message}")]
    Malformed { position: u64, message: String },
    #[error("response ended before the document was complete")]
    UnexpectedEof,
    #[error("response has no root element")]
    Empty,
    #[error("missing required element <{0}>")]
    MissingElement(String),
    #[error("invalid value in <{element}>: {message}")]
    InvalidValue { element: String, message: String },
}

/// Everything a call through [`crate::QueryClient::invoke`] can fail with.
///
/// `E` is the operation's typed service error; the generic one is
/// [`ServiceError`].
#[derive(Debug)]
pub enum InvokeError<E = ServiceError> {
    Configuration(ConfigurationError),
    Transport(TransportError),
    Service(E),
    MalformedResponse(DecodeError),
}

impl<E> InvokeError<E> {
    pub fn service(&self) -> Option<&E> {
        match self {
            InvokeError::Service(e) => Some(e),
            _ => None,
        }
    }

    pub fn map_service<F, G: FnOnce(E) -> F>(self, f: G) -> InvokeError<F> {
        match self {
            InvokeError::Configuration(e) => InvokeError::Configuration(e),
            InvokeError::Transport(e) => InvokeError::Transport(e),
            InvokeError::Service(e) => InvokeError::Service(f(e)),
            InvokeError::MalformedResponse(e) => InvokeError::MalformedResponse(e),
        }
    }
}

impl<E: fmt::Display> fmt::Display for InvokeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::Configuration(e) => write!(f, "configuration: {}", e),
            InvokeError::Transport(e) => write!(f, "transport: {}", e),
            InvokeError::Service(e) => write!(f, "service: {}", e),
            InvokeError::MalformedResponse(e) => write!(f, "{}", e),
        }
    }
}

impl<E> std::error::Error for InvokeError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::Configuration(e) => Some(e),
            InvokeError::Transport(e) => Some(e),
            InvokeError::Service(e) => Some(e),
            InvokeError::MalformedResponse(e) => Some(e),
        }
    }
}

impl<E> From<ConfigurationError> for InvokeError<E> {
    fn from(e: ConfigurationError) -> Self {
        InvokeError::Configuration(e)
    }
}

impl<E> From<TransportError> for InvokeError<E> {
    fn from(e: TransportError) -> Self {
        InvokeError::Transport(e)
    }
}

impl<E> From<DecodeError> for InvokeError<E> {
    fn from(e: DecodeError) -> Self {
        InvokeError::MalformedResponse(e)
    }
}
