//! libcurl transport: a fresh easy handle per attempt.

use super::{Transport, TransportError, TransportErrorKind, WireRequest, WireResponse, FORM_CONTENT_TYPE};
use crate::config::ClientConfig;
use curl::easy::{Easy, HttpVersion, List};
use std::time::Duration;

/// Blocking POST over libcurl.
///
/// Holds only immutable settings; each [`Transport::send`] creates its own
/// handle, so one transport can be shared by concurrent calls.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    timeout: Duration,
    connect_timeout: Duration,
    proxy: Option<String>,
}

impl CurlTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
            proxy: config.proxy(),
        }
    }

    fn configure(&self, easy: &mut Easy, request: &WireRequest<'_>) -> Result<(), curl::Error> {
        easy.url(request.endpoint)?;
        easy.post(true)?;
        easy.post_fields_copy(request.body.as_bytes())?;
        easy.useragent(request.user_agent)?;
        easy.http_version(HttpVersion::V11)?;
        easy.tcp_nodelay(true)?;
        easy.timeout(self.timeout)?;
        easy.connect_timeout(self.connect_timeout)?;
        if let Some(proxy) = &self.proxy {
            easy.proxy(proxy)?;
        }

        let mut headers = List::new();
        headers.append(&format!("Content-Type: {}", FORM_CONTENT_TYPE))?;
        // Empty value suppresses `Expect: 100-continue`.
        headers.append("Expect:")?;
        easy.http_headers(headers)?;
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &WireRequest<'_>) -> Result<WireResponse, TransportError> {
        // Dropping the handle closes it; this covers every return below.
        let mut easy = Easy::new();
        self.configure(&mut easy, request)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        let status = u16::try_from(code)
            .ok()
            .filter(|s| *s != 0)
            .ok_or_else(|| {
                TransportError::new(TransportErrorKind::Other, format!("no HTTP status (got {})", code))
            })?;

        Ok(WireResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
