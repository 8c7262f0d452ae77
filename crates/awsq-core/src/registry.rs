//! Operation lookup by service and action name.
//!
//! Any action can be invoked as a generic [`Document`]; actions whose wire
//! shape needs rewriting pick up their transform here.

use crate::decode::{generic_error, Document, Operation, ResponseTransform, SDB_BASE64};
use crate::error::ServiceError;

const TRANSFORMS: &[(&str, &str, &ResponseTransform)] = &[
    ("sdb", "GetAttributes", &SDB_BASE64),
    ("sdb", "Select", &SDB_BASE64),
];

/// Named transform for `service`/`action`, if it has one.
pub fn transform_for(service: &str, action: &str) -> Option<&'static ResponseTransform> {
    TRANSFORMS
        .iter()
        .find(|(s, a, _)| s.eq_ignore_ascii_case(service) && *a == action)
        .map(|(_, _, t)| *t)
}

/// Generic operation for `action` on `service`.
pub fn lookup(service: &str, action: &str) -> Operation<Document, ServiceError> {
    let mut op = Operation::named(action.to_string(), Document::reduce, generic_error);
    op.transform = transform_for(service, action);
    op
}
