//! Classify one attempt's result.

use crate::transport::{TransportError, WireResponse};

/// Result of one attempt, consumed immediately by the invoker loop.
#[derive(Debug)]
pub enum InvocationOutcome {
    /// 2xx response.
    Success(WireResponse),
    /// HTTP 500 or 503.
    RetryableFailure(WireResponse),
    FatalFailure(FatalFailure),
}

/// Failures that end the call after this attempt.
#[derive(Debug)]
pub enum FatalFailure {
    /// No status line was obtained.
    Transport(TransportError),
    /// Any other non-2xx status; decoded into a service error.
    Status(WireResponse),
}

/// 500 (internal error) and 503 (service unavailable).
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 500 | 503)
}

pub fn classify(result: Result<WireResponse, TransportError>) -> InvocationOutcome {
    match result {
        Err(e) => InvocationOutcome::FatalFailure(FatalFailure::Transport(e)),
        Ok(resp) if resp.is_success() => InvocationOutcome::Success(resp),
        Ok(resp) if is_retryable_status(resp.status) => InvocationOutcome::RetryableFailure(resp),
        Ok(resp) => InvocationOutcome::FatalFailure(FatalFailure::Status(resp)),
    }
}
