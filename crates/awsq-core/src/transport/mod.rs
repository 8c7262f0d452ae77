//! One synchronous HTTP POST per attempt.
//!
//! The [`Transport`] trait is the seam tests replace with a scripted mock;
//! [`CurlTransport`] is the libcurl implementation used by default.

mod curl;

pub use self::curl::CurlTransport;

use std::fmt;

/// Content type of every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// What one attempt sends.
#[derive(Debug, Clone, Copy)]
pub struct WireRequest<'a> {
    pub endpoint: &'a str,
    pub user_agent: &'a str,
    /// Url-encoded `name=value&...` body.
    pub body: &'a str,
}

/// Status line and body of a response. Any status, including 4xx/5xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body, or `None` when it is empty or whitespace only.
    pub fn body_opt(&self) -> Option<&str> {
        if self.body.trim().is_empty() {
            None
        } else {
            Some(self.body.as_str())
        }
    }
}

/// Sends one request. Implementations must be usable from many threads at once.
pub trait Transport: Send + Sync {
    fn send(&self, request: &WireRequest<'_>) -> Result<WireResponse, TransportError>;
}

/// Coarse cause of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Resolve,
    Other,
}

/// No HTTP status line was obtained. Never retried.
#[derive(Debug)]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    source: Option<::curl::Error>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }
}

/// Classify a curl error by what failed.
fn curl_error_kind(e: &::curl::Error) -> TransportErrorKind {
    if e.is_operation_timedout() {
        return TransportErrorKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return TransportErrorKind::Resolve;
    }
    if e.is_couldnt_connect()
        || e.is_ssl_connect_error()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportErrorKind::Connect;
    }
    TransportErrorKind::Other
}

impl From<::curl::Error> for TransportError {
    fn from(e: ::curl::Error) -> Self {
        Self {
            kind: curl_error_kind(&e),
            message: e.to_string(),
            source: Some(e),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Resolve => "could not resolve host",
            TransportErrorKind::Other => "request failed",
        };
        write!(f, "{}: {}", kind, self.message)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
