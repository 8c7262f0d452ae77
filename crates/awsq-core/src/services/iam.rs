//! IAM: `AddUserToGroup`, with typed errors for the codes it documents.

use super::metadata::ResponseMetadata;
use crate::decode::{Operation, XmlCursor};
use crate::error::{DecodeError, InvokeError, ServiceError};
use crate::params::ParameterSet;
use crate::transport::Transport;
use crate::QueryClient;
use serde::Serialize;
use thiserror::Error;

pub const ADD_USER_TO_GROUP: Operation<AddUserToGroupResult, IamError> =
    Operation::new("AddUserToGroup", reduce_add_user_to_group, IamError::from_service);

#[derive(Debug, Error)]
pub enum IamError {
    #[error("no such entity: {}", .0.message)]
    NoSuchEntity(ServiceError),
    #[error("limit exceeded: {}", .0.message)]
    LimitExceeded(ServiceError),
    #[error(transparent)]
    Service(ServiceError),
}

impl IamError {
    pub fn from_service(e: ServiceError) -> Self {
        if e.is_code("NoSuchEntity") {
            IamError::NoSuchEntity(e)
        } else if e.is_code("LimitExceeded") {
            IamError::LimitExceeded(e)
        } else {
            IamError::Service(e)
        }
    }

    pub fn service_error(&self) -> &ServiceError {
        match self {
            IamError::NoSuchEntity(e) | IamError::LimitExceeded(e) | IamError::Service(e) => e,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddUserToGroupRequest {
    pub group_name: String,
    pub user_name: String,
}

impl AddUserToGroupRequest {
    pub fn to_params(&self) -> ParameterSet {
        let mut p = ParameterSet::for_action("AddUserToGroup");
        p.insert("GroupName", self.group_name.as_str())
            .insert("UserName", self.user_name.as_str());
        p
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddUserToGroupResult {
    pub metadata: ResponseMetadata,
}

fn reduce_add_user_to_group(c: &mut XmlCursor<'_>) -> Result<AddUserToGroupResult, DecodeError> {
    let mut out = AddUserToGroupResult::default();
    while c.read()? {
        if c.test_expression("ResponseMetadata", 2) {
            out.metadata = ResponseMetadata::reduce(c)?;
        }
    }
    Ok(out)
}

pub fn add_user_to_group<T: Transport>(
    client: &QueryClient<T>,
    request: &AddUserToGroupRequest,
) -> Result<AddUserToGroupResult, InvokeError<IamError>> {
    client.invoke(&ADD_USER_TO_GROUP, request.to_params())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: u16, code: &str) -> IamError {
        let body = format!(
            "<ErrorResponse xmlns=\"https://iam.amazonaws.com/doc/2010-05-08/\">\
             <Error><Type>Sender</Type><Code>{}</Code><Message>x</Message></Error>\
             <RequestId>7a62c49f-347e-4fc4-9331-6e8eEXAMPLE</RequestId></ErrorResponse>",
            code
        );
        ADD_USER_TO_GROUP.decode_failure(status, Some(body.as_str()))
    }

    #[test]
    fn no_such_entity_is_typed() {
        match failure(404, "NoSuchEntity") {
            IamError::NoSuchEntity(e) => {
                assert_eq!(e.message, "x");
                assert_eq!(e.request_id.as_deref(), Some("7a62c49f-347e-4fc4-9331-6e8eEXAMPLE"));
                assert_eq!(e.status, 404);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn limit_exceeded_and_generic() {
        assert!(matches!(failure(409, "LimitExceeded"), IamError::LimitExceeded(_)));
        let other = failure(400, "InvalidInput");
        assert!(matches!(other, IamError::Service(_)));
        assert_eq!(other.service_error().code(), Some("InvalidInput"));
        assert_eq!(other.to_string(), other.service_error().to_string());
    }

    #[test]
    fn success_reads_request_id() {
        let body = "<AddUserToGroupResponse xmlns=\"https://iam.amazonaws.com/doc/2010-05-08/\">\
            <ResponseMetadata><RequestId>ok-7</RequestId></ResponseMetadata>\
            </AddUserToGroupResponse>";
        let r = ADD_USER_TO_GROUP.decode_success(body).unwrap();
        assert_eq!(r.metadata.request_id.as_deref(), Some("ok-7"));
    }

    #[test]
    fn params() {
        let p = AddUserToGroupRequest {
            group_name: "Admins".to_string(),
            user_name: "Bob".to_string(),
        }
        .to_params();
        assert_eq!(p.to_body(), "Action=AddUserToGroup&GroupName=Admins&UserName=Bob");
    }
}
