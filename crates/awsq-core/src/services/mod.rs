//! Typed façades for a few operations.
//!
//! Each façade only maps request fields to wire parameter names and reduces
//! the response; everything else goes through [`crate::QueryClient::invoke`].

pub mod iam;
pub mod metadata;
pub mod sdb;
pub mod sqs;

pub use metadata::ResponseMetadata;
