//! `awsq sign` – show what would be signed and sent, without sending it.

use super::{client, params};
use crate::cli::Target;
use anyhow::{Context, Result};
use awsq_core::config::AwsqConfig;
use chrono::{DateTime, Utc};

pub fn run_sign(cfg: &AwsqConfig, target: &Target, timestamp: Option<&str>) -> Result<()> {
    let now = match timestamp {
        Some(ts) => parse_timestamp(ts)?,
        None => Utc::now(),
    };
    let client = client(cfg, target)?;
    let signed = client.prepare(&target.action, params(target), now);
    client.close();
    let signed = signed?;

    println!("Endpoint: {}", signed.endpoint);
    println!("String to sign:");
    println!("{}", signed.string_to_sign);
    println!("Signature: {}", signed.params.get("Signature").unwrap_or("-"));
    println!("Body: {}", signed.body);
    Ok(())
}

fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(ts)
        .with_context(|| format!("invalid --timestamp '{}' (expected RFC 3339)", ts))?;
    Ok(parsed.with_timezone(&Utc))
}
