//! The client: build, sign, send with retries, decode.

mod build;
mod run;

pub use build::{format_timestamp, SignedRequest, TIMESTAMP_FORMAT};

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::decode::Operation;
use crate::error::{ConfigurationError, InvokeError};
use crate::params::ParameterSet;
use crate::retry::{Sleep, ThreadSleep};
use crate::transport::{CurlTransport, Transport, WireRequest};
use chrono::{DateTime, Utc};

/// Client for one Query-protocol endpoint.
///
/// Credentials and config are fixed at construction and only read afterwards,
/// so one client can serve calls from many threads. Each call builds its own
/// parameters, signature and retry counter on its own stack.
pub struct QueryClient<T: Transport = CurlTransport> {
    credentials: Credentials,
    config: ClientConfig,
    transport: T,
    sleeper: Box<dyn Sleep>,
}

impl QueryClient<CurlTransport> {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Self {
        let transport = CurlTransport::new(&config);
        Self::with_transport(credentials, config, transport)
    }
}

impl<T: Transport> QueryClient<T> {
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        Self {
            credentials,
            config,
            transport,
            sleeper: Box::new(ThreadSleep),
        }
    }

    /// Replace the backoff sleeper (tests record delays instead of waiting).
    pub fn with_sleeper(mut self, sleeper: impl Sleep + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign `params` for `action` at `now` without sending anything.
    pub fn prepare(
        &self,
        action: &str,
        params: ParameterSet,
        now: DateTime<Utc>,
    ) -> Result<SignedRequest, ConfigurationError> {
        build::build_signed(action, params, &self.credentials, &self.config, now)
    }

    /// Invoke `op` with `params`.
    ///
    /// Returns the typed result, or exactly one of the four error kinds.
    /// Configuration problems are reported before any network call.
    pub fn invoke<R, E>(&self, op: &Operation<R, E>, params: ParameterSet) -> Result<R, InvokeError<E>> {
        let signed = self.prepare(&op.name, params, Utc::now())?;
        tracing::debug!(
            action = %signed.action,
            endpoint = %signed.endpoint,
            params = signed.params.len(),
            "request built"
        );
        let request = WireRequest {
            endpoint: &self.config.service_url,
            user_agent: &self.config.user_agent,
            body: &signed.body,
        };
        run::run(
            &self.transport,
            self.sleeper.as_ref(),
            &self.config.retry_policy(),
            &request,
            op,
        )
    }

    /// Tear the client down, wiping the secret key now.
    pub fn close(mut self) {
        self.credentials.dispose();
    }
}
