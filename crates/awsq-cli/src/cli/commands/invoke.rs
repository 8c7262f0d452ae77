//! `awsq invoke` – call any action and print the response document as JSON.

use super::{client, params};
use crate::cli::Target;
use anyhow::{bail, Result};
use awsq_core::config::AwsqConfig;
use awsq_core::{registry, InvokeError, ServiceError};

pub fn run_invoke(cfg: &AwsqConfig, target: &Target, compact: bool) -> Result<()> {
    let client = client(cfg, target)?;
    let op = registry::lookup(&target.service, &target.action);
    let result = client.invoke(&op, params(target));
    client.close();

    match result {
        Ok(doc) => {
            let json = if compact {
                serde_json::to_string(&doc)?
            } else {
                serde_json::to_string_pretty(&doc)?
            };
            println!("{}", json);
            Ok(())
        }
        Err(InvokeError::Service(e)) => {
            print_service_error(&e);
            bail!("{} {} failed: {}", target.service, target.action, e)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_service_error(e: &ServiceError) {
    eprintln!("{:<12} {}", "Code:", e.code().unwrap_or("-"));
    eprintln!("{:<12} {}", "Message:", e.message);
    if let Some(t) = &e.error_type {
        eprintln!("{:<12} {}", "Type:", t);
    }
    eprintln!("{:<12} {}", "Request id:", e.request_id.as_deref().unwrap_or("-"));
    eprintln!("{:<12} {}", "Status:", e.status);
    if let Some(usage) = &e.box_usage {
        eprintln!("{:<12} {}", "Box usage:", usage);
    }
}
