//! SQS: `ListQueues`.

use super::metadata::ResponseMetadata;
use crate::decode::{generic_error, Operation, XmlCursor};
use crate::error::{DecodeError, InvokeError};
use crate::params::ParameterSet;
use crate::transport::Transport;
use crate::QueryClient;
use serde::Serialize;

pub const LIST_QUEUES: Operation<ListQueuesResult> =
    Operation::new("ListQueues", reduce_list_queues, generic_error);

#[derive(Debug, Clone, Default)]
pub struct ListQueuesRequest {
    pub queue_name_prefix: Option<String>,
}

impl ListQueuesRequest {
    pub fn to_params(&self) -> ParameterSet {
        let mut p = ParameterSet::for_action("ListQueues");
        p.insert_opt("QueueNamePrefix", self.queue_name_prefix.as_deref());
        p
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQueuesResult {
    pub queue_urls: Vec<String>,
    pub metadata: ResponseMetadata,
}

fn reduce_list_queues(c: &mut XmlCursor<'_>) -> Result<ListQueuesResult, DecodeError> {
    let mut out = ListQueuesResult::default();
    while c.read()? {
        if c.test_expression("QueueUrl", 3) {
            out.queue_urls.push(c.read_text()?);
        } else if c.test_expression("ResponseMetadata", 2) {
            out.metadata = ResponseMetadata::reduce(c)?;
        }
    }
    Ok(out)
}

pub fn list_queues<T: Transport>(
    client: &QueryClient<T>,
    request: &ListQueuesRequest,
) -> Result<ListQueuesResult, InvokeError> {
    client.invoke(&LIST_QUEUES, request.to_params())
}
