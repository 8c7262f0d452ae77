//! Sending, retrying and decoding one signed request.

use crate::decode::{self, decode_error, Operation};
use crate::error::{InvokeError, ServiceError};
use crate::retry::{classify, FatalFailure, InvocationOutcome, RetryDecision, RetryPolicy, Sleep};
use crate::transport::{Transport, WireRequest};
use std::time::Duration;

/// Send `request` until it succeeds, fails fatally, or runs out of retries.
///
/// The same signed body goes out on every attempt.
pub fn run<R, E>(
    transport: &dyn Transport,
    sleeper: &dyn Sleep,
    policy: &RetryPolicy,
    request: &WireRequest<'_>,
    op: &Operation<R, E>,
) -> Result<R, InvokeError<E>> {
    let mut attempt = 1u32;
    loop {
        let outcome = classify(transport.send(request));
        match outcome {
            InvocationOutcome::Success(resp) => {
                tracing::debug!(operation = %op.name, attempt, status = resp.status, "response received");
                return decode::decode(op, resp.status, Some(resp.body.as_str()));
            }
            InvocationOutcome::FatalFailure(FatalFailure::Status(resp)) => {
                tracing::debug!(operation = %op.name, attempt, status = resp.status, "error response");
                return decode::decode(op, resp.status, resp.body_opt());
            }
            InvocationOutcome::FatalFailure(FatalFailure::Transport(e)) => {
                tracing::warn!(operation = %op.name, attempt, error = %e, "transport failure");
                return Err(InvokeError::Transport(e));
            }
            InvocationOutcome::RetryableFailure(resp) => match policy.decide(attempt) {
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        operation = %op.name,
                        attempt,
                        status = resp.status,
                        delay_ms = delay_millis(delay),
                        "retryable failure, backing off"
                    );
                    sleeper.sleep(delay);
                    attempt += 1;
                }
                RetryDecision::GiveUp => {
                    tracing::warn!(
                        operation = %op.name,
                        attempts = attempt,
                        status = resp.status,
                        "retries exhausted"
                    );
                    let body = resp.body_opt();
                    let envelope = decode_error(resp.status, body);
                    let mut err = ServiceError::retries_exhausted(
                        policy.max_error_retry,
                        resp.status,
                        body.map(str::to_string),
                    );
                    err.code = envelope.code;
                    err.request_id = envelope.request_id;
                    err.error_type = envelope.error_type;
                    err.box_usage = envelope.box_usage;
                    return Err(InvokeError::Service(op.reduce_service_error(err)));
                }
            },
        }
    }
}

/// Whole milliseconds of `delay`, saturating at `u64::MAX`.
fn delay_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_millis_saturates() {
        assert_eq!(delay_millis(Duration::from_millis(6400)), 6400);
        assert_eq!(delay_millis(Duration::MAX), u64::MAX);
    }
}
