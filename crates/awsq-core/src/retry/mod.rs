//! Retry classification and backoff.
//!
//! Each attempt's transport result is classified into an
//! [`InvocationOutcome`]; the invoker loop asks [`RetryPolicy::decide`] how
//! long to wait before resending a retryable one, and sleeps through a
//! [`Sleep`] so tests can observe delays without waiting.

mod classify;
mod policy;
mod sleep;

pub use classify::{classify, is_retryable_status, FatalFailure, InvocationOutcome};
pub use policy::{RetryDecision, RetryPolicy};
pub use sleep::{Sleep, ThreadSleep};
